use serde::{Deserialize, Serialize};

/// 目标语言类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ru")]
    Russian,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::Portuguese => write!(f, "pt"),
            TargetLanguage::Spanish => write!(f, "es"),
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::Japanese => write!(f, "ja"),
            TargetLanguage::Korean => write!(f, "ko"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::French => write!(f, "fr"),
            TargetLanguage::Russian => write!(f, "ru"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(TargetLanguage::English),
            "pt" | "pt-br" | "portuguese" | "português" => Ok(TargetLanguage::Portuguese),
            "es" | "spanish" | "español" => Ok(TargetLanguage::Spanish),
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "ja" | "japanese" | "日本語" => Ok(TargetLanguage::Japanese),
            "ko" | "korean" | "한국어" => Ok(TargetLanguage::Korean),
            "de" | "german" | "deutsch" => Ok(TargetLanguage::German),
            "fr" | "french" | "français" => Ok(TargetLanguage::French),
            "ru" | "russian" | "русский" => Ok(TargetLanguage::Russian),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Portuguese => "Português",
            TargetLanguage::Spanish => "Español",
            TargetLanguage::Chinese => "中文",
            TargetLanguage::Japanese => "日本語",
            TargetLanguage::Korean => "한국어",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::French => "Français",
            TargetLanguage::Russian => "Русский",
        }
    }

    /// 获取语言的提示词指令
    ///
    /// 只约束自然语言部分（描述、条件、图表标签），JSON键与微代理名称保持英文kebab-case
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::English => {
                "Write every description, condition and diagram label in English, using precise and professional language."
            }
            TargetLanguage::Portuguese => {
                "Escreva todas as descrições, condições e rótulos de diagrama em português, com linguagem precisa e profissional."
            }
            TargetLanguage::Spanish => {
                "Escriba todas las descripciones, condiciones y etiquetas de diagrama en español, con un lenguaje preciso y profesional."
            }
            TargetLanguage::Chinese => "请使用中文编写所有描述、条件和图表标签，确保语言表达准确、专业。",
            TargetLanguage::Japanese => {
                "すべての説明、条件、図のラベルを日本語で記述し、正確で専門的な表現を心がけてください。"
            }
            TargetLanguage::Korean => {
                "모든 설명, 조건 및 다이어그램 레이블을 한국어로 정확하고 전문적으로 작성해 주세요."
            }
            TargetLanguage::German => {
                "Verfassen Sie alle Beschreibungen, Bedingungen und Diagrammbeschriftungen auf Deutsch, präzise und professionell."
            }
            TargetLanguage::French => {
                "Rédigez toutes les descriptions, conditions et étiquettes de diagramme en français, de manière précise et professionnelle."
            }
            TargetLanguage::Russian => {
                "Пишите все описания, условия и подписи диаграмм на русском языке, точно и профессионально."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TargetLanguage;

    #[test]
    fn test_target_language_default_is_english() {
        assert_eq!(TargetLanguage::default(), TargetLanguage::English);
    }

    #[test]
    fn test_target_language_from_str_aliases() {
        assert_eq!(
            "PT".parse::<TargetLanguage>().unwrap(),
            TargetLanguage::Portuguese
        );
        assert_eq!(
            "pt-br".parse::<TargetLanguage>().unwrap(),
            TargetLanguage::Portuguese
        );
        assert_eq!(
            "Deutsch".parse::<TargetLanguage>().unwrap(),
            TargetLanguage::German
        );
        assert!("klingon".parse::<TargetLanguage>().is_err());
    }

    #[test]
    fn test_target_language_display_matches_serde_tag() {
        for language in [
            TargetLanguage::English,
            TargetLanguage::Portuguese,
            TargetLanguage::Chinese,
            TargetLanguage::Russian,
        ] {
            let tag = serde_json::to_string(&language).unwrap();
            assert_eq!(tag, format!("\"{}\"", language));
        }
    }
}
