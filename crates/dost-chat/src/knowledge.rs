//! Keyword knowledge base.
//!
//! An ordered list of categories, each with lowercase keywords and a
//! non-empty list of canned responses. Order matters: the first category
//! with a matching keyword wins, so earlier categories take precedence.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ChatError;

// =============================================================================
// Category
// =============================================================================

/// A named bucket of keywords and interchangeable responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: String,
    keywords: Vec<String>,
    responses: Vec<String>,
}

impl Category {
    /// Create a category. Keywords are lowercased so they compare against a
    /// lowercased utterance.
    pub fn new<I, K, J, R>(id: impl Into<String>, keywords: I, responses: J) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
        J: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            id: id.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// First keyword contained in `normalized`, in definition order.
    pub fn matching_keyword(&self, normalized: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| normalized.contains(k.as_str()))
            .map(String::as_str)
    }

    fn validate(&self) -> Result<(), ChatError> {
        if self.id.trim().is_empty() {
            return Err(ChatError::EmptyCategoryId);
        }
        if self.responses.is_empty() {
            return Err(ChatError::EmptyResponses(self.id.clone()));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ChatError::EmptyKeyword(self.id.clone()));
        }
        Ok(())
    }
}

// =============================================================================
// KnowledgeBase
// =============================================================================

/// Read-only, ordered collection of categories.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    categories: Vec<Category>,
}

/// On-disk layout: a TOML array of `[[category]]` tables.
#[derive(Debug, Deserialize)]
struct KnowledgeBaseFile {
    #[serde(default)]
    category: Vec<CategoryRecord>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    id: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    responses: Vec<String>,
}

impl KnowledgeBase {
    /// Build a knowledge base, rejecting categories with no responses, empty
    /// keywords, or a repeated id.
    pub fn new(categories: Vec<Category>) -> Result<Self, ChatError> {
        let mut seen = HashSet::new();
        for category in &categories {
            category.validate()?;
            if !seen.insert(category.id.as_str()) {
                return Err(ChatError::DuplicateCategory(category.id.clone()));
            }
        }
        Ok(Self { categories })
    }

    /// Parse a knowledge base from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ChatError> {
        let file: KnowledgeBaseFile = toml::from_str(content)?;
        let categories = file
            .category
            .into_iter()
            .map(|r| Category::new(r.id, r.keywords, r.responses))
            .collect();
        Self::new(categories)
    }

    /// Load a knowledge base from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path)?;
        let kb = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            categories = kb.len(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    /// Categories in precedence order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// First category with a keyword contained in `normalized`.
    pub fn find_match(&self, normalized: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.matching_keyword(normalized).is_some())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The knowledge base shipped with the website.
    ///
    /// Keywords and responses are authored once in mixed Hindi/English and
    /// are used whatever the active language.
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                Category::new(
                    "dbt",
                    ["dbt", "direct benefit transfer", "benefit transfer", "subsidy", "scholarship payment", "डीबीटी", "सब्सिडी"],
                    [
                        "Direct Benefit Transfer (DBT) एक सरकारी initiative है जो subsidies और benefits को सीधे beneficiaries के bank accounts में transfer करती है। यह intermediaries को eliminate करती है।",
                        "DBT के लिए आपका Aadhaar आपके bank account से linked होना चाहिए। यह ensure करता है कि benefits सही recipient तक delay या corruption के बिना पहुंचें।",
                        "DBT का use विभिन्न schemes में होता है जैसे scholarships, LPG subsidies, MGNREGA payments, और pension transfers।",
                    ],
                ),
                Category::new(
                    "aadhaar",
                    ["aadhaar", "aadhar", "uid", "biometric", "12 digit", "uidai", "आधार", "यूआईडी"],
                    [
                        "Aadhaar एक 12-digit unique identification number है जो UIDAI द्वारा issue किया जाता है। यह Indian residents के लिए identity और address का proof serve करता है।",
                        "Aadhaar को bank accounts से link करना KYC compliance में help करता है और government schemes से direct benefit transfers को enable करता है।",
                        "आप अपना Aadhaar linking status UIDAI website पर जाकर 'Bank Seeding Status' feature का use करके check कर सकते हैं।",
                    ],
                ),
                Category::new(
                    "nsp",
                    ["nsp", "national scholarship portal", "scholarship", "student aid", "education", "छात्रवृत्ति", "स्कॉलरशिप"],
                    [
                        "National Scholarship Portal (NSP) students के लिए एक one-stop solution है विभिन्न government scholarships के लिए apply करने के लिए।",
                        "NSP से scholarship money receive करने के लिए, आपका bank account DBT-enabled और Aadhaar-linked होना चाहिए।",
                        "NSP central government, state governments, और UGC की scholarships को cover करता है different categories के students के लिए।",
                    ],
                ),
                Category::new(
                    "linking",
                    ["link", "connect", "seeding", "bank account", "how to link", "लिंक", "जोड़ना", "सीडिंग"],
                    [
                        "Aadhaar को bank account से link करने के लिए: 1) अपनी bank branch जाएं, 2) Aadhaar linking form भरें, 3) Aadhaar card और account details submit करें, 4) confirmation SMS का wait करें।",
                        "Bank seeding का मतलब है आपके Aadhaar-linked account को NPCI mapper में register करना ताकि DBT payments आप तक पहुंच सकें।",
                        "आप myaadhaar.uidai.gov.in पर जाकर 'Bank Seeding Status' check करके देख सकते हैं कि आपका account linked है या नहीं।",
                    ],
                ),
                Category::new(
                    "eligibility",
                    ["eligible", "qualify", "criteria", "requirements", "who can apply", "पात्रता", "योग्यता"],
                    [
                        "अधिकतर government schemes including NSP scholarships के लिए आपको चाहिए: 1) Valid Aadhaar card, 2) Aadhaar-linked bank account, 3) DBT-enabled account status।",
                        "Scholarship eligibility scheme के अनुसार vary करती है - NSP portal पर income criteria, educational qualifications, और category requirements check करें।",
                        "SC/ST/OBC/Minority communities के students के लिए अक्सर specific scholarship schemes होती हैं relaxed criteria के साथ।",
                    ],
                ),
                Category::new(
                    "problems",
                    ["problem", "issue", "error", "not working", "failed", "rejected", "समस्या", "परेशानी", "गलती"],
                    [
                        "Common issues: Aadhaar bank account से linked नहीं है, bank account DBT-enabled नहीं है, application में incorrect details हैं।",
                        "अगर scholarship credit नहीं हुई: 1) DBT status check करें, 2) Aadhaar linking verify करें, 3) Nodal officer से contact करें, 4) Bank details update करें अगर change हुई हैं।",
                        "NSP portal की technical issues के लिए helpline contact करें या अपने institution के scholarship coordinator से बात करें।",
                    ],
                ),
            ],
        }
    }
}
