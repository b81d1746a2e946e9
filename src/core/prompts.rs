//! Prompt templates for the per-company workflow.
//!
//! The prompts are written in Japanese because the letters are addressed to
//! Japanese companies.

/// Format instruction applied to the address-check answer.
pub const ADDRESS_FORMAT_INSTRUCTION: &str =
    "YesまたはNoのみを出力してください。余計な説明は不要です。";

/// Format instruction applied to the drafted letter.
pub const LETTER_FORMAT_INSTRUCTION: &str = "「このたび、貴社の～ご連絡を差し上げました。」という完全な文章のみを出力してください。「最終出力：」などの接頭語は含めないでください。";

/// Template sentence whose `{事業内容理解}` placeholder the model rewrites.
pub const LETTER_TEMPLATE: &str =
    "このたび、貴社の{事業内容理解}を拝見し、大変興味を抱き、ご連絡を差し上げました。";

pub fn address_check(company_name: &str, address: &str) -> String {
    format!(
        "{}の現在の本社所在地は{}であっていますか？",
        company_name, address
    )
}

/// Research prompt. Both fallbacks (general technology efforts, then core
/// business strengths) are left to the model.
pub fn technology_research(company_name: &str, address: &str) -> String {
    format!(
        "{address}に所在する「{company_name}」にCXOレターを執筆したい。以下の(1)を対応してください。\
         (1)最初に、先方企業のAIと3D設計技術に関する取り組みをWeb上で幅広く調べ、出力して。\
         どうしても見つからない場合には、当該企業の先端技術に対する推進の取り組みを複数挙げて。\
         それすらも見つからない場合、当該企業の強み的な事業内容を調べ、出力して。"
    )
}

/// Letter prompt. `research` is embedded verbatim.
pub fn letter_draft(company_name: &str, address: &str, research: &str) -> String {
    format!(
        "{address}に所在する「{company_name}」にCXOレターを執筆したい。以下の(2)に続きで対応してください。\
         (2) 次に、以下の調査結果の中でインパクトが大きく興味深い内容にもとづき、\
         以下のsentence Xの{{{{事業内容理解}}}}の箇所を、先方企業の取り組み（Webの検索結果）に合わせて書き換えたものを\
         1文(1.5行程度)の端的なボリュームで、「最終出力：」に続けて出力して。\n\n\
         調査結果：\n{research}\n\n\
         sentence X = '''{template}'''",
        template = LETTER_TEMPLATE
    )
}

pub fn format_compliance(original_response: &str, format_instruction: &str) -> String {
    format!(
        "\n以下の回答を、指定された形式に厳密に従って再構成してください：\n\n\
         回答: {original_response}\n\n\
         形式指示: {format_instruction}\n\n\
         形式に従った回答のみを出力してください。余計な説明は不要です。\n"
    )
}
