//! Prompt texts sent to the AI collaborator.

use crate::household_model::MealPlan;
use serde::Serialize;

/// Shopping-list category order: produce, meat, seafood, dairy/egg/soy,
/// seasoning, dry goods and grain, other processed
pub const CATEGORY_ORDER: &[&str] = &[
    "野菜・果物",
    "肉",
    "魚介類",
    "乳製品・卵・大豆製品",
    "調味料・スパイス",
    "乾物・穀物・粉類",
    "その他・加工品",
];

/// Recipe category counted against the weekly soup cap
pub const SOUP_CATEGORY: &str = "汁物";

/// Recipe summary given to the meal planner
#[derive(Debug, Clone, Serialize)]
pub struct PlanRecipe<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
}

pub fn recipe_extraction_prompt() -> String {
    r#"あなたは料理研究家です。画像に写っているレシピを読み取り、JSONオブジェクトだけを返してください。

キーは 'name', 'category', 'cookingTime', 'tags', 'ingredients', 'instructions' の6つで、すべて必須です。
- cookingTime: 調理時間（分）を数値で。読み取れなければ推定してください。
- tags: 料理に合うタグを3つ、文字列の配列で。
- ingredients: {"name": 材料名, "quantity": 分量} の配列。分量は「200g」「大さじ2」「1/2個」のように書いてください。
- instructions: 手順を改行区切りの1つの文字列で。

説明文やコードブロックの記号は付けないでください。"#
        .to_string()
}

pub fn meal_plan_prompt(recipes: &[PlanRecipe<'_>], prefilled: &MealPlan, request: Option<&str>) -> String {
    let recipes_json = serde_json::to_string_pretty(recipes).unwrap_or_else(|_| "[]".to_string());
    let prefilled_json = serde_json::to_string_pretty(prefilled).unwrap_or_else(|_| "{}".to_string());
    let request = request
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or("特になし");

    format!(
        r#"あなたは家庭の献立づくりを手伝うアシスタントです。1週間の夕食の献立を完成させてください。

# 利用可能なレシピ
{recipes_json}

# 決定済みの献立（変更しないこと）
{prefilled_json}

# 追加の要望
{request}

# ルール
1. 決定済みの曜日には何も出力しないでください。
2. 空いている曜日だけを、上のレシピのID（例: "recipe-1"）または「外食」などの短いラベルで埋めてください。
3. 栄養と味のバランスを考えてください。
4. カテゴリが '{SOUP_CATEGORY}' のレシピは週に2〜3回までにしてください。
5. 曜日キー（monday〜sunday）から文字列の配列への対応を持つJSONオブジェクトだけを返してください。

例: {{"monday": ["recipe-1"], "tuesday": ["外食"], "friday": ["recipe-5", "recipe-6"]}}"#
    )
}

pub fn categorize_prompt(list_text: &str) -> String {
    let categories: String = CATEGORY_ORDER
        .iter()
        .map(|category| format!("- {category}\n"))
        .collect();

    format!(
        r#"あなたは買い物リストを整理するアシスタントです。下の買い物リストを、カテゴリーの並び順に従って並べ替えてください。

# ルール
- 出力は「- 材料名 数量」形式の行だけにしてください。
- カテゴリー名や見出し、前置きの文章は出力しないでください。
- 材料名と数量は元のリストのまま変えないでください。

# カテゴリーの並び順
{categories}
# 買い物リスト
{list_text}
"#
    )
}

pub fn conversion_prompt(ingredient: &str, from_unit: &str, to_unit: &str) -> String {
    format!(
        r#"「{ingredient}」の「1{from_unit}」はおよそ何「{to_unit}」ですか？
{{"rate": 18}} のように、"rate" に数値だけを入れたJSONオブジェクトで答えてください。
換算できない場合は {{"rate": null}} と答えてください。説明は不要です。"#
    )
}

pub fn unit_suggestion_prompt(ingredient: &str, number: &str) -> String {
    format!(
        r#"材料「{ingredient}」と数量「{number}」を組み合わせた、家庭料理でよく使う分量の書き方を3〜5個提案してください。
例: 豆腐と1なら「1丁」「1パック」、牛乳と100なら「100ml」「100cc」。
{{"suggestions": ["1個", "1玉"]}} の形式のJSONだけを返してください。"#
    )
}
