/// Форматирует сумму в колумбийских песо: `$ 1.234.567`.
/// Копейки не показываются, округление до целого.
pub fn format_cop(amount: f64) -> String {
    if !amount.is_finite() {
        return "$ 0".to_string();
    }
    let rounded = amount.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}$ {}", sign, group_thousands(rounded.unsigned_abs()))
}

/// Количество: целое без дробной части, иначе до двух знаков с запятой
pub fn format_quantity(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        let grouped = group_thousands(value.round().abs() as u64);
        if value < 0.0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').replace('.', ",")
    }
}

fn group_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cop_format() {
        assert_eq!(format_cop(0.0), "$ 0");
        assert_eq!(format_cop(999.0), "$ 999");
        assert_eq!(format_cop(1234567.4), "$ 1.234.567");
        assert_eq!(format_cop(1000.5), "$ 1.001");
        assert_eq!(format_cop(-2500.0), "-$ 2.500");
        assert_eq!(format_cop(f64::NAN), "$ 0");
    }

    #[test]
    fn quantity_format() {
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(1500.0), "1.500");
        assert_eq!(format_quantity(2.5), "2,5");
        assert_eq!(format_quantity(-3.0), "-3");
    }
}
