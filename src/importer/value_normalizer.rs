// ==========================================
// HVDC 物流 Flow Code 引擎 - 值标准化器
// ==========================================
// 职责: 全角/特殊空白清洗 / 空值判定 / 时间戳识别
// 红线: 全函数,任何输入都不报错
// ==========================================

use crate::domain::shipment::CellValue;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Excel 1900 日期系统基准 (含 1900-02-29 闰年缺陷的修正)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// 视为日期的 Excel 序列号范围: 1970-01-01 ..= 2099-12-31
const EXCEL_SERIAL_MIN: f64 = 25569.0;
const EXCEL_SERIAL_MAX: f64 = 73050.0;

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%Y%m%d"];

pub struct ValueNormalizer;

impl ValueNormalizer {
    /// 清洗单元格文本
    ///
    /// - 全角空格 (U+3000) 及其他特殊空白替换为普通空格
    /// - 连续空白折叠为一个空格,去除首尾空白
    /// - 空值 / NaN / 错误单元格返回空串
    pub fn clean(value: &CellValue) -> String {
        match value {
            CellValue::Empty | CellValue::Error(_) => String::new(),
            CellValue::Text(text) => Self::clean_str(text),
            CellValue::Number(n) => Self::format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(ts) => {
                if ts.time() == NaiveTime::MIN {
                    ts.format("%Y-%m-%d").to_string()
                } else {
                    ts.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
        }
    }

    /// 清洗纯文本
    pub fn clean_str(text: &str) -> String {
        text.chars()
            .map(|c| if Self::is_space_variant(c) { ' ' } else { c })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 有效值: 清洗后非空,且不是 "nan" / "none"
    pub fn is_valid(value: &CellValue) -> bool {
        Self::is_valid_str(&Self::clean(value))
    }

    pub fn is_valid_str(cleaned: &str) -> bool {
        !cleaned.is_empty()
            && !cleaned.eq_ignore_ascii_case("nan")
            && !cleaned.eq_ignore_ascii_case("none")
    }

    /// 识别时间戳; 有效但不是日期的值 (如 MOSB 列中的文本标记) 返回 None
    pub fn to_timestamp(value: &CellValue) -> Option<NaiveDateTime> {
        match value {
            CellValue::DateTime(ts) => Some(*ts),
            CellValue::Number(n) => Self::excel_serial_to_datetime(*n),
            CellValue::Text(text) => Self::parse_timestamp_str(&Self::clean_str(text)),
            CellValue::Empty | CellValue::Bool(_) | CellValue::Error(_) => None,
        }
    }

    /// Excel 序列号 → 时间戳
    pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
        if !serial.is_finite() || !(EXCEL_SERIAL_MIN..=EXCEL_SERIAL_MAX).contains(&serial) {
            return None;
        }
        let (y, m, d) = EXCEL_EPOCH;
        let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_time(NaiveTime::MIN);
        let days = serial.trunc() as i64;
        let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;
        epoch
            .checked_add_signed(Duration::days(days))?
            .checked_add_signed(Duration::seconds(seconds))
    }

    fn parse_timestamp_str(text: &str) -> Option<NaiveDateTime> {
        if text.is_empty() {
            return None;
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(text, fmt) {
                return Some(ts);
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
                return Some(date.and_time(NaiveTime::MIN));
            }
        }
        // 文本形式的序列号 (CSV 导出常见)
        text.parse::<f64>()
            .ok()
            .and_then(Self::excel_serial_to_datetime)
    }

    fn is_space_variant(c: char) -> bool {
        c.is_whitespace() || matches!(c, '\u{200B}' | '\u{FEFF}')
    }

    fn format_number(n: f64) -> String {
        if n.is_nan() {
            String::new()
        } else if n.fract() == 0.0 && n.abs() < 1e15 {
            format!("{}", n as i64)
        } else {
            n.to_string()
        }
    }
}
