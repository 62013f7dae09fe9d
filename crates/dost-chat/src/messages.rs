//! Localized fixed strings.
//!
//! Every string the assistant produces that does not come from the knowledge
//! base lives here, keyed by [`Message`] and rendered per [`Language`].

use dost_core::Language;

/// Fixed user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    /// Opening line of a chat session.
    Welcome,
    /// Reply to a bare greeting.
    Greeting,
    /// Reply to thanks.
    Thanks,
    /// Out-of-scope disclaimer when nothing matched.
    OutOfScope,
    /// Remote service answered with an error status.
    ServerError,
    /// Remote service answered without an answer.
    NoAnswer,
    /// Remote service could not be reached.
    NetworkError,
}

impl Message {
    /// Render this message in `lang`.
    pub fn text(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Message::Welcome, Language::Hindi) => {
                "नमस्ते! मैं आपका DBT Dost हूं। मैं Aadhaar और DBT के बारे में आपकी help कर सकता हूं। कुछ भी पूछें!"
            }
            (Message::Welcome, Language::English) => {
                "Hello! I'm your DBT Dost. I can help you with Aadhaar and DBT related questions. Ask me anything!"
            }
            (Message::Greeting, Language::Hindi) => {
                "नमस्ते! मैं आपकी Aadhaar और DBT related questions में help कर सकता हूं। DBT, Aadhaar linking, NSP scholarships, या bank account seeding के बारे में पूछें।"
            }
            (Message::Greeting, Language::English) => {
                "Hello! I can help you with Aadhaar and DBT related questions. Ask about DBT, Aadhaar linking, NSP scholarships, or bank account seeding."
            }
            (Message::Thanks, Language::Hindi) => {
                "आपका स्वागत है! Aadhaar और DBT systems के बारे में और भी questions पूछ सकते हैं।"
            }
            (Message::Thanks, Language::English) => {
                "You're welcome! Feel free to ask more questions about Aadhaar and DBT."
            }
            (Message::OutOfScope, Language::Hindi) => {
                "मैं केवल Aadhaar और DBT related questions में help कर सकता हूं। कृपया DBT, Aadhaar linking, NSP scholarships, या bank seeding के बारे में पूछें। अन्य queries के लिए relevant government helpline contact करें।"
            }
            (Message::OutOfScope, Language::English) => {
                "I can only help with Aadhaar and DBT related questions. Please ask about topics like DBT, Aadhaar linking, NSP scholarships, or bank seeding."
            }
            (Message::ServerError, Language::Hindi) => {
                "माफ़ कीजिए, सर्वर में समस्या आई है। कृपया थोड़ी देर बाद फिर से प्रयास करें।"
            }
            (Message::ServerError, Language::English) => {
                "Sorry, the server ran into a problem. Please try again in a little while."
            }
            (Message::NoAnswer, Language::Hindi) => {
                "माफ़ कीजिए, इस प्रश्न का उत्तर अभी उपलब्ध नहीं है। कृपया अधिक जानकारी के लिए सरकारी पोर्टल देखें।"
            }
            (Message::NoAnswer, Language::English) => {
                "Sorry, no answer is available for that question. Please check official government portals for more information."
            }
            (Message::NetworkError, Language::Hindi) => {
                "नेटवर्क त्रुटि। कृपया अपना इंटरनेट कनेक्शन जांचें और फिर से प्रयास करें।"
            }
            (Message::NetworkError, Language::English) => {
                "Network error. Please check your internet connection and try again."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Message; 7] = [
        Message::Welcome,
        Message::Greeting,
        Message::Thanks,
        Message::OutOfScope,
        Message::ServerError,
        Message::NoAnswer,
        Message::NetworkError,
    ];

    #[test]
    fn test_every_message_is_non_empty_in_every_language() {
        for msg in ALL {
            for lang in Language::ALL {
                assert!(!msg.text(lang).trim().is_empty(), "{:?}/{:?}", msg, lang);
            }
        }
    }

    #[test]
    fn test_languages_render_differently() {
        for msg in ALL {
            assert_ne!(msg.text(Language::Hindi), msg.text(Language::English));
        }
    }

    #[test]
    fn test_remote_failure_messages_are_distinct() {
        for lang in Language::ALL {
            let server = Message::ServerError.text(lang);
            let none = Message::NoAnswer.text(lang);
            let network = Message::NetworkError.text(lang);
            assert_ne!(server, none);
            assert_ne!(server, network);
            assert_ne!(none, network);
        }
    }
}
