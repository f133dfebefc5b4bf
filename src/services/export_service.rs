use crate::error::Result;
use crate::models::candidate::Candidate;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use std::collections::HashMap;
use uuid::Uuid;

pub struct ExportService;

impl ExportService {
    /// Build an XLSX workbook from candidate rows. `username_map` resolves
    /// the audit columns to readable names.
    pub fn generate_candidates_xlsx(
        candidates: &[Candidate],
        username_map: &HashMap<Uuid, String>,
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Candidates")?;

        let columns = [
            ("Serial No.", 12.0),
            ("Name", 25.0),
            ("Mobile", 15.0),
            ("Email", 25.0),
            ("Client", 15.0),
            ("Position", 20.0),
            ("Date of Call", 15.0),
            ("Interview Type", 15.0),
            ("HR Status", 12.0),
            ("Client Status", 14.0),
            ("Final Status", 18.0),
            ("Created By", 20.0),
            ("Created At", 20.0),
            ("Updated By", 20.0),
            ("Updated At", 20.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let header_format = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(rust_xlsxwriter::Color::RGB(0x0F172A))
            .set_font_color(rust_xlsxwriter::Color::White);

        for (i, (title, _)) in columns.iter().enumerate() {
            worksheet.write_with_format(0, i as u16, *title, &header_format)?;
        }

        let resolve = |id: Option<Uuid>| -> String {
            id.and_then(|id| username_map.get(&id).cloned())
                .unwrap_or_default()
        };

        for (row_idx, c) in candidates.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            worksheet.write(row, 0, c.serial_ref_number as f64)?;
            worksheet.write(row, 1, c.candidate_name.as_str())?;
            worksheet.write(row, 2, c.mobile.as_str())?;
            worksheet.write(row, 3, c.email.as_deref().unwrap_or(""))?;
            worksheet.write(row, 4, c.client.as_str())?;
            worksheet.write(row, 5, c.position.as_str())?;
            worksheet.write(row, 6, c.date_of_call.format("%Y-%m-%d").to_string())?;
            worksheet.write(row, 7, c.interview_type.as_str())?;
            worksheet.write(row, 8, c.hr_status.as_str())?;
            worksheet.write(row, 9, c.client_status.map(|s| s.as_str()).unwrap_or(""))?;
            worksheet.write(row, 10, c.final_status.map(|s| s.as_str()).unwrap_or(""))?;
            worksheet.write(row, 11, resolve(Some(c.created_by)))?;
            worksheet.write(row, 12, c.created_at.format("%Y-%m-%d %H:%M").to_string())?;
            worksheet.write(row, 13, resolve(c.updated_by))?;
            worksheet.write(row, 14, c.updated_at.format("%Y-%m-%d %H:%M").to_string())?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
