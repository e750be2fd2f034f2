//! Keyword Responder

/// Coarse intent detected from a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Prediction,
    Explanation,
    Savings,
    Thanks,
    Unknown,
}

/// Keyword table, checked in order; first hit wins.
///
/// Keywords match as substrings of the lower-cased message, so "this"
/// counts as a greeting.
const KEYWORDS: [(Intent, &[&str]); 5] = [
    (Intent::Greeting, &["hello", "hi", "hey"]),
    (Intent::Prediction, &["predict", "prediction", "calculate", "energy"]),
    (Intent::Explanation, &["how", "what", "explain"]),
    (Intent::Savings, &["reduce", "save", "optimize", "tips"]),
    (Intent::Thanks, &["thank", "thanks"]),
];

impl Intent {
    /// Classify a message
    pub fn detect(message: &str) -> Self {
        let lower = message.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map_or(Intent::Unknown, |(intent, _)| *intent)
    }

    /// Canned reply for the intent
    pub fn reply(&self) -> &'static str {
        match self {
            Intent::Greeting => "Hello! I'm your Smart Energy Assistant. I can help you predict energy consumption and provide optimization tips. How can I assist you today?",
            Intent::Prediction => "I can help you predict energy consumption! You can either use the Prediction tab for quick results, or I can guide you through the data collection step by step. Would you like me to collect your data?",
            Intent::Explanation => "I analyze energy consumption based on factors like temperature, humidity, occupancy, HVAC usage, and more. I use machine learning to provide accurate predictions and personalized recommendations!",
            Intent::Savings => "Here are quick energy-saving tips: 1) Raise thermostat by 2°C in summer, 2) Use natural lighting when possible, 3) Turn off devices when not in use, 4) Consider renewable energy sources. Want personalized recommendations? Use the Prediction tab!",
            Intent::Thanks => "You're welcome! Feel free to ask if you need anything else about energy optimization!",
            Intent::Unknown => "I'm here to help with energy predictions and optimization! Try asking me about: predicting energy consumption, energy-saving tips, or how the system works. You can also use the Prediction tab for detailed analysis!",
        }
    }
}

/// Deterministic responder used when no provider is available
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedResponder;

impl RuleBasedResponder {
    /// Answer a message from the keyword table
    pub fn respond(&self, message: &str) -> &'static str {
        Intent::detect(message).reply()
    }
}
