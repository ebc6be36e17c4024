//! # Ingredient Synonyms Module
//!
//! Decides when two ingredient names refer to the same foodstuff. Names are
//! equivalent when they are equal after lower-casing or when they belong to
//! the same synonym group (different scripts and spellings of one ingredient).
//!
//! Inventory matching is first-match: the first inventory row whose synonym
//! set intersects the query's wins, even when a later row would fit better.

use crate::household_model::InventoryItem;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Interchangeable names for one ingredient. No name may appear in two groups.
pub static SYNONYM_GROUPS: &[&[&str]] = &[
    &["豚", "ぶた", "ポーク"],
    &["鶏", "鳥", "とり", "チキン"],
    &["牛", "ぎゅう", "ビーフ"],
    &["卵", "玉子", "たまご", "エッグ"],
    &["じゃがいも", "ジャガイモ", "ポテト", "馬鈴薯"],
    &["玉葱", "玉ねぎ", "たまねぎ", "タマネギ", "オニオン"],
    &["人参", "にんじん", "ニンジン", "キャロット"],
    &["魚", "さかな"],
    &["米", "ごはん", "御飯", "ライス"],
    &["パン", "ぱん", "ブレッド"],
    &["鮭", "さけ", "しゃけ", "サーモン"],
    &["海老", "えび", "エビ"],
    &["豆腐", "とうふ"],
    &["茸", "きのこ", "キノコ"],
    &["ピーマン", "ぴーまん"],
    &["茄子", "なす", "ナス"],
    &["大根", "だいこん"],
    &["醤油", "しょうゆ", "薄口醤油", "濃口醤油"],
    &["にんにく", "ニンニク", "ガーリック"],
    &["生姜", "しょうが", "ジンジャー"],
];

lazy_static! {
    /// Lower-cased member name -> index into `SYNONYM_GROUPS`
    static ref GROUP_INDEX: HashMap<String, usize> = {
        let mut map = HashMap::with_capacity(96);
        for (index, group) in SYNONYM_GROUPS.iter().enumerate() {
            for &name in *group {
                map.insert(name.to_lowercase(), index);
            }
        }
        map
    };
}

/// The synonym group containing `name`, if any
pub fn synonym_group(name: &str) -> Option<&'static [&'static str]> {
    GROUP_INDEX
        .get(&name.trim().to_lowercase())
        .map(|&index| SYNONYM_GROUPS[index])
}

/// All lower-cased names equivalent to `name`, including itself
///
/// ```rust
/// use kondate::synonyms::synonym_set;
///
/// assert!(synonym_set("ポーク").contains(&"豚".to_string()));
/// assert_eq!(synonym_set("ごぼう"), vec!["ごぼう".to_string()]);
/// ```
pub fn synonym_set(name: &str) -> Vec<String> {
    match synonym_group(name) {
        Some(group) => group.iter().map(|s| s.to_lowercase()).collect(),
        None => vec![name.trim().to_lowercase()],
    }
}

/// Whether two names denote the same ingredient
pub fn same_ingredient(a: &str, b: &str) -> bool {
    let a_set = synonym_set(a);
    let b_set = synonym_set(b);
    a_set.iter().any(|name| b_set.contains(name))
}

/// Index of the first element whose name is equivalent to `name`
pub fn find_matching_index_by<T>(
    name: &str,
    items: &[T],
    name_of: impl Fn(&T) -> &str,
) -> Option<usize> {
    let query = synonym_set(name);
    items.iter().position(|item| {
        synonym_set(name_of(item))
            .iter()
            .any(|candidate| query.contains(candidate))
    })
}

/// First inventory item matching `name`
///
/// # Examples
///
/// ```rust
/// use kondate::household_model::InventoryItem;
/// use kondate::synonyms::find_matching_inventory_item;
///
/// let inventory = vec![
///     InventoryItem::new("inv-1", "醤油", 1000.0, "ml"),
///     InventoryItem::new("inv-2", "たまご", 6.0, "個"),
/// ];
///
/// let egg = find_matching_inventory_item("卵", &inventory).unwrap();
/// assert_eq!(egg.id, "inv-2");
/// assert!(find_matching_inventory_item("ごぼう", &inventory).is_none());
/// ```
pub fn find_matching_inventory_item<'a>(
    name: &str,
    inventory: &'a [InventoryItem],
) -> Option<&'a InventoryItem> {
    find_matching_index_by(name, inventory, |item| item.name.as_str()).map(|i| &inventory[i])
}

/// Hiragana to katakana; other characters pass through
pub fn to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Katakana to hiragana; other characters pass through
pub fn to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Search keywords for a recipe search term
///
/// The lower-cased term in both kana scripts, plus every member of a synonym
/// group reachable from any of those forms (also in both scripts).
pub fn search_keywords(term: &str) -> Vec<String> {
    let lowered = term.trim().to_lowercase();
    if lowered.is_empty() {
        return Vec::new();
    }

    let mut keywords: Vec<String> = Vec::new();
    let mut push = |word: String| {
        if !word.is_empty() && !keywords.contains(&word) {
            keywords.push(word);
        }
    };

    let hiragana = to_hiragana(&lowered);
    let katakana = to_katakana(&lowered);
    let group = synonym_group(&lowered)
        .or_else(|| synonym_group(&hiragana))
        .or_else(|| synonym_group(&katakana));

    push(lowered);
    push(hiragana);
    push(katakana);

    if let Some(group) = group {
        for member in group {
            let member = member.to_lowercase();
            push(to_hiragana(&member));
            push(to_katakana(&member));
            push(member);
        }
    }

    keywords
}
