//! Нормализация текста для поиска: нижний регистр без диакритики.

/// Приводит строку к нижнему регистру и убирает испанскую/латинскую
/// диакритику (á -> a, ñ -> n, ü -> u).
pub fn fold(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .map(strip_accent)
        .collect()
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Содержит ли хотя бы одно из полей подстроку запроса.
/// Пустой запрос совпадает со всем.
pub fn any_field_matches<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let q = fold(query.trim());
    if q.is_empty() {
        return true;
    }
    fields.into_iter().any(|f| fold(f).contains(&q))
}

/// Диапазоны байтов в `text`, совпавшие с `query` (для подсветки).
/// Сравнение идёт по свёрнутым символам, поэтому границы берутся
/// из исходной строки посимвольно.
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = fold(query.trim()).chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let chars: Vec<(usize, char)> = text
        .char_indices()
        .map(|(i, c)| (i, c.to_lowercase().next().map(strip_accent).unwrap_or(c)))
        .collect();

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= chars.len() {
        let hit = chars[i..i + needle.len()]
            .iter()
            .zip(needle.iter())
            .all(|((_, a), b)| a == b);
        if hit {
            let start = chars[i].0;
            let end = chars
                .get(i + needle.len())
                .map(|(idx, _)| *idx)
                .unwrap_or(text.len());
            ranges.push((start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_accents() {
        assert_eq!(fold("Algodón PIMA"), "algodon pima");
        assert_eq!(fold("Ñandú"), "nandu");
        assert_eq!(fold("devolución"), "devolucion");
    }

    #[test]
    fn any_field() {
        assert!(any_field_matches("ALGODON", ["Tela de algodón", "REF-1"]));
        assert!(any_field_matches("  ", ["x"]));
        assert!(!any_field_matches("lino", ["seda", "ref"]));
    }

    #[test]
    fn ranges_point_into_original_text() {
        let text = "Camión Azul";
        let r = match_ranges(text, "camion");
        assert_eq!(r, vec![(0, "Camión".len())]);
        assert_eq!(&text[r[0].0..r[0].1], "Camión");

        assert_eq!(match_ranges("aXaXa", "a"), vec![(0, 1), (2, 3), (4, 5)]);
        assert!(match_ranges("abc", "").is_empty());
    }
}
