//! Excel 생성 (공통 라이브러리)
//!
//! 매칭 결과를 한 장짜리 시트로 만든다.
//! 필수조건을 통과하지 못한 행은 회색으로 표시한다.

use super::{has_failed_rows, mandatory_label, MANDATORY_HEADERS, RESULT_HEADERS};
use crate::types::PairResult;
use rust_xlsxwriter::*;

/// 열 너비 (문자 수 기준)
const COLUMN_WIDTHS: [f64; 9] = [14.0, 14.0, 10.0, 10.0, 10.0, 16.0, 60.0, 10.0, 36.0];

/// Excel을 버퍼에 생성
///
/// # Arguments
/// * `results` - 정렬된 매칭 결과
/// * `sheet_name` - 시트 이름
pub fn generate_excel_buffer(results: &[PairResult], sheet_name: &str) -> Result<Vec<u8>, String> {
    let include_mandatory = has_failed_rows(results);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("시트 이름 설정 오류: {}", e))?;

    // 서식 정의
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5E1EA))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));
    let number_format = text_format.clone().set_num_format("0.#");
    let percent_format = text_format.clone().set_num_format("0.0");

    let failed_text = text_format.clone().set_font_color(Color::RGB(0x999999));
    let failed_number = number_format.clone().set_font_color(Color::RGB(0x999999));
    let failed_percent = percent_format.clone().set_font_color(Color::RGB(0x999999));

    let mut headers: Vec<&str> = RESULT_HEADERS.to_vec();
    if include_mandatory {
        headers.extend(MANDATORY_HEADERS);
    }

    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| format!("헤더 쓰기 오류: {}", e))?;
        worksheet
            .set_column_width(col, COLUMN_WIDTHS[col as usize])
            .map_err(|e| format!("열 너비 설정 오류: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("틀 고정 오류: {}", e))?;

    for (index, result) in results.iter().enumerate() {
        let row = index as u32 + 1;
        let (text, number, percent) = if result.mandatory_ok {
            (&text_format, &number_format, &percent_format)
        } else {
            (&failed_text, &failed_number, &failed_percent)
        };

        let texts = [
            (0, result.nickname_a.clone()),
            (1, result.nickname_b.clone()),
            (5, result.summary()),
            (6, result.matched_summary()),
        ];
        for (col, value) in texts {
            worksheet
                .write_string_with_format(row, col, value, text)
                .map_err(|e| format!("값 쓰기 오류: {}", e))?;
        }

        worksheet
            .write_number_with_format(row, 2, result.score, number)
            .map_err(|e| format!("점수 쓰기 오류: {}", e))?;
        worksheet
            .write_number_with_format(row, 3, result.total, number)
            .map_err(|e| format!("총점 쓰기 오류: {}", e))?;
        worksheet
            .write_number_with_format(row, 4, result.percent, percent)
            .map_err(|e| format!("비율 쓰기 오류: {}", e))?;

        if include_mandatory {
            worksheet
                .write_string_with_format(row, 7, mandatory_label(result), text)
                .map_err(|e| format!("필수조건 쓰기 오류: {}", e))?;
            worksheet
                .write_string_with_format(
                    row,
                    8,
                    result.failure_reason.clone().unwrap_or_default(),
                    text,
                )
                .map_err(|e| format!("사유 쓰기 오류: {}", e))?;
        }
    }

    // 버퍼에 출력
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel 저장 오류: {}", e))
}
