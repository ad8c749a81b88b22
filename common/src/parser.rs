//! 対話入力パーサー
//!
//! メニュー番号・サブメニューの複数選択・手入力のPLUリストを解釈する。

use crate::error::{Error, Result};

/// トップメニューの入力結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// "0" で終了
    Exit,
    /// 0始まりのメニュー項目番号
    Entry(usize),
    Invalid,
}

/// トップメニューの入力を解釈
///
/// `entry_count` 件の項目が `[1]..[entry_count]` として表示されている前提。
pub fn parse_menu_choice(input: &str, entry_count: usize) -> MenuChoice {
    let input = input.trim();
    if input == "0" {
        return MenuChoice::Exit;
    }
    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= entry_count => MenuChoice::Entry(n - 1),
        _ => MenuChoice::Invalid,
    }
}

/// サブメニューの複数選択（カンマ区切り）を解釈
///
/// すべての番号が `1..=item_count` の範囲内なら0始まりの番号列を返す。
/// 1つでも範囲外・非数値があればエラー。
///
/// # Examples
/// ```
/// use plu_barcode_common::parse_selection;
///
/// assert_eq!(parse_selection("1,3", 4).unwrap(), vec![0, 2]);
/// assert!(parse_selection("1,5", 4).is_err());
/// ```
pub fn parse_selection(input: &str, item_count: usize) -> Result<Vec<usize>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::InvalidSelection(String::new()));
    }

    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<usize>() {
                Ok(n) if n >= 1 && n <= item_count => Ok(n - 1),
                _ => Err(Error::InvalidSelection(part.to_string())),
            }
        })
        .collect()
}

/// 手入力のPLUリスト（カンマ区切り）を分割
///
/// 前後の空白を除去し、空の要素は捨てる。順序は入力のまま。
pub fn parse_code_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice() {
        assert_eq!(parse_menu_choice("0", 5), MenuChoice::Exit);
        assert_eq!(parse_menu_choice(" 1 ", 5), MenuChoice::Entry(0));
        assert_eq!(parse_menu_choice("5", 5), MenuChoice::Entry(4));
        assert_eq!(parse_menu_choice("6", 5), MenuChoice::Invalid);
        assert_eq!(parse_menu_choice("abc", 5), MenuChoice::Invalid);
        assert_eq!(parse_menu_choice("", 5), MenuChoice::Invalid);
        assert_eq!(parse_menu_choice("-1", 5), MenuChoice::Invalid);
    }

    #[test]
    fn test_selection_multiple() {
        assert_eq!(parse_selection("2, 1", 3).unwrap(), vec![1, 0]);
        assert_eq!(parse_selection("3", 3).unwrap(), vec![2]);
    }

    #[test]
    fn test_selection_rejects_any_bad_part() {
        assert!(parse_selection("1,0", 3).is_err());
        assert!(parse_selection("1,x", 3).is_err());
        assert!(parse_selection("1,,2", 3).is_err());
        assert!(parse_selection("", 3).is_err());
        assert!(parse_selection("1", 0).is_err());
    }

    #[test]
    fn test_code_list_trims_and_drops_empty() {
        let codes = parse_code_list(" 101, 202 ,, ,303");
        assert_eq!(codes, vec!["101", "202", "303"]);
    }

    #[test]
    fn test_code_list_empty_input() {
        assert!(parse_code_list("").is_empty());
        assert!(parse_code_list(" , ").is_empty());
    }
}
