//! UI string table, one entry per key and language.
use crate::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Slogan,
    AnalyzingArtwork,
    PleaseWait,
    GeneratingSummary,
    Artwork,
    ArtworkPhoto,
    LabelPhoto,
    ArtworkInformation,
    ProcessingLabel,
    SubmittedInformation,
    ArtistName,
    ArtworkTitle,
    Medium,
    Year,
    Dimensions,
    OtherNotes,
    AiAnalysis,
    AnalyzeArtwork,
    AnalyzeAnother,
    Summary,
    FullAnalysis,
    SummaryReadTime,
    FullReadTime,
    ReadFullAnalysis,
    ShowSummaryOnly,
    TranslatingAnalysis,
    Error,
    UploadArtworkFirst,
    OcrError,
    ApiError,
    ErrorDetails,
    TranslationUnavailable,
    Busy,
    PhotoSaved,
    AnalysisSaved,
    AnalysisShared,
    ShareCopied,
    ExportFailed,
    NotAvailable,
    NotSelected,
    DisclaimerTitle,
    DisclaimerText,
}

/// Looks up the UI string for `key` in `language`.
pub fn text(key: Key, language: Language) -> &'static str {
    let [en, zh_tw, zh_cn] = entry(key);
    match language {
        Language::En => en,
        Language::ZhTw => zh_tw,
        Language::ZhCn => zh_cn,
    }
}

fn entry(key: Key) -> [&'static str; 3] {
    match key {
        Key::Slogan => ["Art. Decoded.", "藝術 · 解碼", "艺术 · 解码"],
        Key::AnalyzingArtwork => ["Analyzing Artwork...", "正在分析藝術品...", "正在分析艺术品..."],
        Key::PleaseWait => [
            "Please wait while the AI processes your submission. This may take a moment.",
            "請稍候，AI正在處理您的提交。這可能需要一點時間。",
            "请稍候，AI正在处理您的提交。这可能需要一点时间。",
        ],
        Key::GeneratingSummary => ["Writing summary...", "正在產生摘要...", "正在生成摘要..."],
        Key::Artwork => ["Artwork", "藝術品", "艺术品"],
        Key::ArtworkPhoto => ["Artwork Photo", "藝術品照片", "艺术品照片"],
        Key::LabelPhoto => ["Artwork Label", "作品標籤", "作品标签"],
        Key::ArtworkInformation => ["Artwork Information", "藝術品資訊", "艺术品信息"],
        Key::ProcessingLabel => ["(Processing Label...)", "(正在處理標籤...)", "(正在处理标签...)"],
        Key::SubmittedInformation => ["Submitted Information", "提交的資訊", "提交的信息"],
        Key::ArtistName => ["Artist Name:", "藝術家名稱：", "艺术家名称："],
        Key::ArtworkTitle => ["Artwork Title:", "作品標題：", "作品标题："],
        Key::Medium => ["Medium:", "媒材：", "媒材："],
        Key::Year => ["Year:", "年份：", "年份："],
        Key::Dimensions => ["Dimensions:", "尺寸：", "尺寸："],
        Key::OtherNotes => ["Other Notes:", "其他備註：", "其他备注："],
        Key::AiAnalysis => ["AI Analysis", "AI 分析", "AI 分析"],
        Key::AnalyzeArtwork => ["Analyze Artwork", "分析藝術品", "分析艺术品"],
        Key::AnalyzeAnother => ["Analyze Another Artwork", "分析另一件藝術品", "分析另一件艺术品"],
        Key::Summary => ["Summary", "摘要", "摘要"],
        Key::FullAnalysis => ["Full Analysis", "完整分析", "完整分析"],
        Key::SummaryReadTime => ["~30 sec read", "約 30 秒閱讀", "约 30 秒阅读"],
        Key::FullReadTime => ["~2-3 min read", "約 2-3 分鐘閱讀", "约 2-3 分钟阅读"],
        Key::ReadFullAnalysis => ["Read Full Analysis", "閱讀完整分析", "阅读完整分析"],
        Key::ShowSummaryOnly => ["Show Summary Only", "只顯示摘要", "只显示摘要"],
        Key::TranslatingAnalysis => ["Translating analysis...", "正在翻譯分析...", "正在翻译分析..."],
        Key::Error => ["Error", "錯誤", "错误"],
        Key::UploadArtworkFirst => [
            "Please upload an artwork photo.",
            "請上傳藝術品照片。",
            "请上传艺术品照片。",
        ],
        Key::OcrError => [
            "Error during OCR processing. Please try again or input manually.",
            "OCR處理過程中出錯。請重試或手動輸入。",
            "OCR处理过程中出错。请重试或手动输入。",
        ],
        Key::ApiError => [
            "Failed to get analysis from AI. Please check your API key or network connection and try again.",
            "無法從AI獲取分析。請檢查您的API密鑰或網絡連接，然後重試。",
            "无法从AI获取分析。请检查您的API密钥或网络连接，然后重试。",
        ],
        Key::ErrorDetails => ["Error details:", "錯誤詳情：", "错误详情："],
        Key::TranslationUnavailable => [
            "Translation service temporarily unavailable. Showing fallback content.",
            "翻譯服務暫時無法使用，目前顯示備用內容。",
            "翻译服务暂时无法使用，目前显示备用内容。",
        ],
        Key::Busy => [
            "Please wait for the current request to finish.",
            "請等待目前的請求完成。",
            "请等待当前的请求完成。",
        ],
        Key::PhotoSaved => ["Artwork photo saved:", "藝術品照片已儲存：", "艺术品照片已保存："],
        Key::AnalysisSaved => ["Analysis image saved:", "分析圖片已儲存：", "分析图片已保存："],
        Key::AnalysisShared => ["Analysis image shared.", "分析圖片已分享。", "分析图片已分享。"],
        Key::ShareCopied => [
            "Image sharing is unavailable. Share this text instead:",
            "無法分享圖片，請改為分享以下文字：",
            "无法分享图片，请改为分享以下文字：",
        ],
        Key::ExportFailed => [
            "Unable to generate analysis image. Please try again.",
            "無法產生分析圖片，請重試。",
            "无法生成分析图片，请重试。",
        ],
        Key::NotAvailable => ["N/A", "無資料", "无数据"],
        Key::NotSelected => ["(none)", "（未選擇）", "（未选择）"],
        Key::DisclaimerTitle => ["Disclaimer:", "免責聲明：", "免责声明："],
        Key::DisclaimerText => [
            "Artl.app provides AI-generated interpretations of artwork for educational, creative, and entertainment purposes. The insights are subjective and should not be considered professional art critique or academic analysis. Users are responsible for the content they upload and share.",
            "Artl.app 提供 AI 生成的藝術品詮釋，用於教育、創意和娛樂目的。這些見解是主觀的，不應被視為專業藝術評論或學術分析。用戶對其上傳和分享的內容負責。",
            "Artl.app 提供 AI 生成的艺术品诠释，用于教育、创意和娱乐目的。这些见解是主观的，不应被视为专业艺术评论或学术分析。用户对其上传和分享的内容负责。",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::{text, Key};
    use crate::Language;

    #[test]
    fn every_language_has_its_own_slogan() {
        assert_eq!(text(Key::Slogan, Language::En), "Art. Decoded.");
        assert_eq!(text(Key::Slogan, Language::ZhTw), "藝術 · 解碼");
        assert_eq!(text(Key::Slogan, Language::ZhCn), "艺术 · 解码");
    }
}
