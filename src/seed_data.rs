//! Sample recipes and pantry used when no state file exists yet.

use crate::household_model::{InventoryItem, Recipe, RecipeIngredient};
use crate::recipe_catalog::RecipeCatalog;

struct SeedRecipe {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    cooking_time: u32,
    tags: &'static [&'static str],
    ingredients: &'static [(&'static str, &'static str)],
    instructions: &'static str,
    memo: &'static str,
    is_favorite: bool,
    times_cooked: u32,
}

const SEED_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        id: "recipe-1",
        name: "豚の生姜焼き",
        category: "炒め物",
        cooking_time: 15,
        tags: &["豚肉", "定番", "簡単", "和食"],
        ingredients: &[
            ("豚ロース肉", "200g"),
            ("玉ねぎ", "1/2個"),
            ("生姜", "1かけ"),
            ("醤油", "大さじ2"),
            ("みりん", "大さじ2"),
        ],
        instructions: "玉ねぎは薄切り、生姜はすりおろす。\n豚肉を焼き、玉ねぎを加えて炒める。\n調味料を加えて絡める。",
        memo: "",
        is_favorite: true,
        times_cooked: 12,
    },
    SeedRecipe {
        id: "recipe-2",
        name: "肉じゃが",
        category: "煮物",
        cooking_time: 30,
        tags: &["牛肉", "野菜", "定番", "和食"],
        ingredients: &[
            ("牛肉", "150g"),
            ("じゃがいも", "3個"),
            ("人参", "1本"),
            ("玉ねぎ", "1個"),
            ("醤油", "大さじ3"),
            ("砂糖", "大さじ2"),
        ],
        instructions: "材料を食べやすい大きさに切る。\n鍋で牛肉を炒め、野菜を加えてさらに炒める。\n水と調味料を加えて、野菜が柔らかくなるまで煮込む。",
        memo: "じゃがいもはメークインが煮崩れしにくい。",
        is_favorite: false,
        times_cooked: 5,
    },
    SeedRecipe {
        id: "recipe-3",
        name: "鶏の唐揚げ",
        category: "揚げ物",
        cooking_time: 25,
        tags: &["鶏肉", "人気", "お弁当"],
        ingredients: &[
            ("鶏もも肉", "300g"),
            ("片栗粉", "大さじ3"),
            ("醤油", "大さじ2"),
            ("にんにく", "1かけ"),
        ],
        instructions: "鶏肉を一口大に切り、調味料に漬け込む。\n片栗粉をまぶし、170℃の油で揚げる。",
        memo: "二度揚げすると更にカリッと仕上がる。",
        is_favorite: true,
        times_cooked: 21,
    },
    SeedRecipe {
        id: "recipe-4",
        name: "きんぴらごぼう",
        category: "炒め物",
        cooking_time: 20,
        tags: &["野菜", "常備菜", "和食"],
        ingredients: &[
            ("ごぼう", "1本"),
            ("人参", "1/2本"),
            ("ごま油", "大さじ1"),
            ("鷹の爪", "1本"),
        ],
        instructions: "ごぼうと人参を千切りにする。\nごま油で炒め、調味料で味付けする。",
        memo: "",
        is_favorite: false,
        times_cooked: 8,
    },
    SeedRecipe {
        id: "recipe-5",
        name: "だし巻き卵",
        category: "焼き物",
        cooking_time: 10,
        tags: &["卵", "定番", "朝食"],
        ingredients: &[("卵", "3個"), ("だし汁", "50ml"), ("薄口醤油", "小さじ1")],
        instructions: "材料を混ぜ合わせる。\n卵焼き器で数回に分けて焼く。",
        memo: "",
        is_favorite: false,
        times_cooked: 3,
    },
    SeedRecipe {
        id: "recipe-6",
        name: "味噌汁",
        category: "汁物",
        cooking_time: 10,
        tags: &["豆腐", "基本", "和食"],
        ingredients: &[
            ("豆腐", "1/4丁"),
            ("わかめ", "少々"),
            ("だし汁", "400ml"),
            ("味噌", "大さじ2"),
        ],
        instructions: "だし汁を温め、具材を入れる。\n火を止めて味噌を溶き入れる。",
        memo: "",
        is_favorite: false,
        times_cooked: 35,
    },
    SeedRecipe {
        id: "recipe-7",
        name: "鮭の塩焼き",
        category: "焼き物",
        cooking_time: 15,
        tags: &["魚", "簡単", "和食"],
        ingredients: &[("生鮭", "2切れ"), ("塩", "少々")],
        instructions: "鮭に塩を振る。\nグリルで両面を焼く。",
        memo: "",
        is_favorite: false,
        times_cooked: 15,
    },
];

// (id, name, category, quantity, unit, threshold, purchase unit, purchase quantity)
type SeedItem = (&'static str, &'static str, &'static str, f64, &'static str, f64, &'static str, f64);

const SEED_INVENTORY: &[SeedItem] = &[
    ("inv-1", "醤油", "調味料", 1000.0, "ml", 200.0, "本", 1.0),
    ("inv-2", "みりん", "調味料", 500.0, "ml", 100.0, "本", 1.0),
    ("inv-3", "砂糖", "調味料", 1000.0, "g", 200.0, "袋", 1.0),
    ("inv-4", "塩", "調味料", 1000.0, "g", 200.0, "袋", 1.0),
    ("inv-5", "ごま油", "調味料", 200.0, "ml", 50.0, "本", 1.0),
    ("inv-6", "片栗粉", "乾物・穀物・粉類", 200.0, "g", 50.0, "袋", 1.0),
    ("inv-7", "味噌", "調味料", 750.0, "g", 100.0, "パック", 1.0),
    ("inv-8", "卵", "乳製品・卵・大豆製品", 6.0, "個", 2.0, "パック", 10.0),
    ("inv-9", "玉ねぎ", "野菜・果物", 3.0, "個", 1.0, "袋", 3.0),
];

pub fn sample_recipes() -> RecipeCatalog {
    let recipes = SEED_RECIPES
        .iter()
        .map(|seed| Recipe {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            category: seed.category.to_string(),
            cooking_time: seed.cooking_time,
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            ingredients: seed
                .ingredients
                .iter()
                .map(|(name, quantity)| RecipeIngredient::new(*name, *quantity))
                .collect(),
            instructions: seed.instructions.to_string(),
            link_url: String::new(),
            memo: seed.memo.to_string(),
            image_url: None,
            is_favorite: seed.is_favorite,
            times_cooked: seed.times_cooked,
        })
        .collect();
    RecipeCatalog::new(recipes)
}

/// Sample pantry, sorted by name
pub fn sample_inventory() -> Vec<InventoryItem> {
    let mut inventory: Vec<InventoryItem> = SEED_INVENTORY
        .iter()
        .map(|&(id, name, category, quantity, unit, threshold, purchase_unit, purchase_quantity)| {
            InventoryItem::new(id, name, quantity, unit)
                .with_category(category)
                .with_threshold(threshold)
                .with_purchase(purchase_unit, purchase_quantity)
        })
        .collect();
    inventory.sort_by(|a, b| a.name.cmp(&b.name));
    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity_parser::parse_quantity;

    #[test]
    fn test_sample_ids_are_unique() {
        let recipes = sample_recipes();
        let mut ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), recipes.len());
    }

    #[test]
    fn test_only_seasoning_pinches_are_unquantifiable() {
        let recipes = sample_recipes();
        let unparsable: Vec<&str> = recipes
            .iter()
            .flat_map(|r| r.ingredients.iter())
            .filter(|i| parse_quantity(&i.quantity).is_none())
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(unparsable, vec!["わかめ", "塩"]);
    }

    #[test]
    fn test_sample_inventory_sorted() {
        let inventory = sample_inventory();
        assert_eq!(inventory.len(), 9);
        assert!(inventory.windows(2).all(|w| w[0].name <= w[1].name));
    }
}
