//! Prompt text sent to the generative model, one template per language.
use crate::{ArtworkInfo, Field, Language};

/// Text shared when the platform cannot share the composed image.
pub const SHARE_TEXT: &str = "Analyzed with ARTL - Instant AI Art Analysis\nhttps://artl.app/";

struct DetailLabels {
    title: &'static str,
    artist: &'static str,
    medium: &'static str,
    year: &'static str,
    notes: &'static str,
    not_provided: &'static str,
}

fn detail_labels(language: Language) -> DetailLabels {
    match language {
        Language::En => DetailLabels {
            title: "Artwork Title",
            artist: "Artist Name",
            medium: "Medium",
            year: "Year of Creation",
            notes: "Additional Notes",
            not_provided: "Not Provided",
        },
        Language::ZhTw => DetailLabels {
            title: "作品標題",
            artist: "藝術家名稱",
            medium: "媒材",
            year: "創作年份",
            notes: "其他備註",
            not_provided: "未提供",
        },
        Language::ZhCn => DetailLabels {
            title: "作品标题",
            artist: "艺术家名称",
            medium: "媒材",
            year: "创作年份",
            notes: "其他备注",
            not_provided: "未提供",
        },
    }
}

fn artwork_details(labels: &DetailLabels, info: &ArtworkInfo) -> String {
    let value = |field| info.provided(field).unwrap_or(labels.not_provided);
    format!(
        "\n- {}: {}\n- {}: {}\n- {}: {}\n- {}: {}",
        labels.title,
        value(Field::Title),
        labels.artist,
        value(Field::ArtistName),
        labels.medium,
        value(Field::Medium),
        labels.year,
        value(Field::Year),
    )
}

/// Builds the critique request for the artwork photo and its metadata.
pub fn critique_prompt(language: Language, info: &ArtworkInfo) -> String {
    let labels = detail_labels(language);
    let details = artwork_details(&labels, info);
    let mut prompt = match language {
        Language::En => format!(
            "You are a very experienced art critic with vast knowledge and good taste. After obtaining the artwork photo and label, search online for its information.\n\n\
             Analyze as an experienced art critic the following artwork based on the image and the provided details:\n{details}\n\n\
             Given the uploaded image of the artwork, along with details such as the title, artist name, medium, and year of creation, as an experienced art critic, provide a brief analysis. \
             Summarize the key visual elements (such as colors, composition, and technique), offer insights into the artist's style and influences, and explain the artwork's significance in its historical or cultural context. \
             Keep the analysis between 200 to 500 words, focusing on a general understanding of the artwork for a wide audience. Respond in English."
        ),
        Language::ZhTw => format!(
            "您是一位經驗豐富的藝術評論家，擁有廣博的知識和良好的品味。在取得藝術品照片和標籤後，請先在網路上搜尋其相關資訊。\n\n\
             請以經驗豐富的藝術評論家身份，根據提供的圖片和以下藝術品資訊，對此藝術品進行分析：\n{details}\n\n\
             根據上傳的藝術品圖片，以及作品標題、藝術家名稱、媒材和創作年份等詳細資訊，以經驗豐富的藝術評論家身份提供簡要分析。\
             總結關鍵的視覺元素（例如顏色、構圖和技巧），提供對藝術家風格和影響的見解，並解釋該藝術品在其歷史或文化背景下的重要性。\
             將分析內容控制在200到500字之間，著重於讓廣大觀眾對藝術品有概括性的理解。請以繁體中文回應。"
        ),
        Language::ZhCn => format!(
            "您是一位经验丰富的艺术评论家，拥有广博的知识和良好的品味。在获取艺术品照片和标签后，请先在网络上搜索其相关信息。\n\n\
             请以经验丰富的艺术评论家身份，根据提供的图片和以下艺术品信息，对此艺术品进行分析：\n{details}\n\n\
             根据上传的艺术品图片，以及作品标题、艺术家名称、媒材和创作年份等详细信息，以经验丰富的艺术评论家身份提供简要分析。\
             总结关键的视觉元素（例如颜色、构图和技巧），提供对艺术家风格和影响的见解，并解释该艺术品在其历史或文化背景下的重要性。\
             将分析内容控制在200到500字之间，着重于让广大观众对艺术品有概括性的理解。请以简体中文回应。"
        ),
    };

    if let Some(notes) = info.provided(Field::Notes) {
        prompt.push_str(&format!("\n- {}: {}", labels.notes, notes));
    }
    prompt
}

/// Instruction prefix for condensing a critique; the critique text follows it.
pub fn summary_instruction(language: Language) -> &'static str {
    match language {
        Language::En => "Please provide a concise summary of the following art analysis in 50-100 words, focusing on the key points and main insights:\n\n",
        Language::ZhTw => "請為以下藝術分析提供一個簡潔的摘要，控制在50-100字內，重點關注關鍵要點和主要見解：\n\n",
        Language::ZhCn => "请为以下艺术分析提供一个简洁的摘要，控制在50-100字内，重点关注关键要点和主要见解：\n\n",
    }
}

pub fn translate_prompt(language: Language, text: &str) -> String {
    let instruction = match language {
        Language::En => "Translate to English:",
        Language::ZhTw => "翻譯成繁體中文:",
        Language::ZhCn => "翻译成简体中文:",
    };
    format!("{instruction}\n\n{text}")
}

/// Shown in place of a description whose translation failed.
pub fn translation_fallback_description(language: Language, original: &str) -> String {
    match language {
        Language::En => format!(
            "【English Analysis】\n\nThis is an artwork analysis. Translation service is temporarily unavailable, please try again later.\n\nOriginal analysis: {original}"
        ),
        Language::ZhTw => format!(
            "【繁體中文分析】\n\n這是一件藝術作品的分析。由於翻譯服務暫時無法使用，請稍後再試或聯繫支援。\n\n原始分析：{original}"
        ),
        Language::ZhCn => format!(
            "【简体中文分析】\n\n这是一件艺术作品的分析。由于翻译服务暂时无法使用，请稍后再试或联系支持。\n\n原始分析：{original}"
        ),
    }
}

/// Shown in place of a summary whose translation failed.
pub fn translation_fallback_summary(language: Language, original: &str) -> String {
    match language {
        Language::En => format!("【English Summary】{original}"),
        Language::ZhTw => format!("【繁體中文摘要】{original}"),
        Language::ZhCn => format!("【简体中文摘要】{original}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> ArtworkInfo {
        let mut info = ArtworkInfo::default();
        info.set(Field::Title, "The Starry Night");
        info.set(Field::ArtistName, "Vincent van Gogh");
        info
    }

    #[test]
    fn absent_fields_render_as_not_provided() {
        let prompt = critique_prompt(Language::En, &info());
        assert!(prompt.contains("- Artwork Title: The Starry Night"));
        assert!(prompt.contains("- Artist Name: Vincent van Gogh"));
        assert!(prompt.contains("- Medium: Not Provided"));
        assert!(prompt.contains("- Year of Creation: Not Provided"));
        assert!(prompt.ends_with("Respond in English."));
    }

    #[test]
    fn notes_are_appended_in_the_prompt_language() {
        let mut info = info();
        info.set(Field::Notes, "  seen at MoMA ");
        let prompt = critique_prompt(Language::ZhTw, &info);
        assert!(prompt.contains("- 作品標題: The Starry Night"));
        assert!(prompt.contains("- 媒材: 未提供"));
        assert!(prompt.ends_with("\n- 其他備註: seen at MoMA"));
    }

    #[test]
    fn translate_prompt_prefixes_instruction() {
        assert_eq!(
            translate_prompt(Language::ZhCn, "text"),
            "翻译成简体中文:\n\ntext"
        );
    }
}
