// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::get_headers;
use crate::export::notify_export_success;
use crate::models::record::Record;
use crate::ui::messages::info;
use crate::utils::excel::{date_to_serial, time_to_serial};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with banded rows and real date / time cells.
pub(crate) fn export_xlsx(records: &[Record], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("time_log").map_err(to_io_app_error)?;

    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_io_app_error)?;
    }
    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    // Date and time cells render wider than their header
    col_widths[0] = col_widths[0].max(10);
    col_widths[2] = col_widths[2].max(5);
    col_widths[3] = col_widths[3].max(5);

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (i, rec) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let bg = if i % 2 == 0 { band1 } else { band2 };

        let day = date_to_serial(rec.date)
            .ok_or_else(|| AppError::Export(format!("date out of range: {}", rec.date)))?;
        write_serial(worksheet, row, 0, day, "yyyy-mm-dd", bg)?;

        let text = cell_format(bg);
        worksheet
            .write_with_format(row, 1, rec.task.as_str(), &text)
            .map_err(to_io_app_error)?;
        col_widths[1] = col_widths[1].max(rec.task.width());

        for (col, time) in [(2, rec.start), (3, rec.end)] {
            match time {
                Some(t) => write_serial(worksheet, row, col, time_to_serial(t), "hh:mm", bg)?,
                None => {
                    worksheet
                        .write_blank(row, col, &cell_format(bg))
                        .map_err(to_io_app_error)?;
                }
            }
        }

        let num = cell_format(bg).set_align(FormatAlign::Right);
        worksheet
            .write_with_format(row, 4, rec.duration_minutes as f64, &num)
            .map_err(to_io_app_error)?;
        col_widths[4] = col_widths[4].max(rec.duration_minutes.to_string().len());
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_io_app_error)?;
    }

    workbook.save(path).map_err(to_io_app_error)?;

    notify_export_success("XLSX", records.len(), path);
    Ok(())
}

fn cell_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_serial(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    serial: f64,
    num_format: &str,
    bg: Color,
) -> AppResult<()> {
    let fmt = cell_format(bg).set_num_format(num_format);
    worksheet
        .write_with_format(row, col, serial, &fmt)
        .map_err(to_io_app_error)?;
    Ok(())
}

fn to_io_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::from(io::Error::other(e.to_string()))
}
