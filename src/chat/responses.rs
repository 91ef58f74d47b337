//! Canned replies and the keyword rules that pick them.
//!
//! Rules are checked in order against the lower-cased message and the first
//! rule with any keyword contained as a substring wins. Matching is plain
//! containment, so "pythonic" still hits the Python rule.

/// Which canned reply a message maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    PythonFunction,
    Debugging,
    HtmlCss,
    Algorithms,
    Fallback,
}

pub const PYTHON_REPLY: &str = "Python functions are defined using the 'def' keyword. Here's a simple example:\n\n```python\ndef greet(name):\n    return f\"Hello, {name}!\"\n\nprint(greet(\"Anna Laura\"))\n```\nThis function takes a name parameter and returns a greeting message!";

pub const DEBUG_REPLY: &str = "To debug code effectively:\n1. Read error messages carefully\n2. Use print statements\n3. Check variable values\n4. Test small parts individually\n5. Use a debugger if available";

pub const HTML_REPLY: &str = "Here's a simple HTML/CSS example:\n\n```html\n<!DOCTYPE html>\n<html>\n<head>\n    <style>\n        .card {\n            padding: 20px;\n            background: #f0f0f0;\n            border-radius: 10px;\n        }\n    </style>\n</head>\n<body>\n    <div class=\"card\">Hello World!</div>\n</body>\n</html>```";

pub const ALGORITHMS_REPLY: &str = "Algorithms are step-by-step procedures for solving problems. Common types include:\n• Sorting (QuickSort, MergeSort)\n• Searching (Binary Search)\n• Graph algorithms (Dijkstra, BFS)\n• Dynamic Programming";

pub const FALLBACK_REPLY: &str = "I'm Anna Laura AI, your coding assistant! I can help you with:\n• Python programming\n• Debugging code\n• Web development (HTML/CSS/JS)\n• Algorithm explanations\n• Best coding practices\n\nWhat specific coding topic would you like to explore?";

pub const WELCOME_MESSAGE: &str = "Hello! I'm Anna Laura AI, your intelligent coding assistant. I can help you with programming concepts, debugging, web development, and algorithms. What would you like to learn today?";

/// A keyword rule: any keyword present selects `topic`.
pub struct ResponseRule {
    pub keywords: &'static [&'static str],
    pub topic: Topic,
}

/// Priority-ordered rule table. Keywords are lower-case.
pub const RULES: &[ResponseRule] = &[
    ResponseRule { keywords: &["python", "function"], topic: Topic::PythonFunction },
    ResponseRule { keywords: &["debug", "error"], topic: Topic::Debugging },
    ResponseRule { keywords: &["html", "css"], topic: Topic::HtmlCss },
    ResponseRule { keywords: &["algorithm"], topic: Topic::Algorithms },
];

impl Topic {
    pub fn reply(self) -> &'static str {
        match self {
            Topic::PythonFunction => PYTHON_REPLY,
            Topic::Debugging => DEBUG_REPLY,
            Topic::HtmlCss => HTML_REPLY,
            Topic::Algorithms => ALGORITHMS_REPLY,
            Topic::Fallback => FALLBACK_REPLY,
        }
    }
}

pub fn topic_for(text: &str) -> Topic {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| rule.topic)
        .unwrap_or(Topic::Fallback)
}

/// Canned reply for a user message.
pub fn classify(text: &str) -> &'static str {
    topic_for(text).reply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_priority() {
        assert_eq!(topic_for("I need a python function"), Topic::PythonFunction);
        assert_eq!(topic_for("fix this error in my debug session, also python"), Topic::PythonFunction);
        assert_eq!(topic_for("how do I style this with css"), Topic::HtmlCss);
        assert_eq!(topic_for("explain sorting algorithm"), Topic::Algorithms);
        assert_eq!(topic_for("what's the weather"), Topic::Fallback);
    }

    #[test]
    fn test_substring_and_case() {
        assert_eq!(topic_for("Pythonic style?"), Topic::PythonFunction);
        assert_eq!(topic_for("ERRORS everywhere"), Topic::Debugging);
        assert_eq!(topic_for("Algorithms 101"), Topic::Algorithms);
        assert_eq!(topic_for("algo"), Topic::Fallback);
    }

    #[test]
    fn test_classify_returns_reply_text() {
        assert_eq!(classify("debug me"), DEBUG_REPLY);
        assert_eq!(classify(""), FALLBACK_REPLY);
    }
}
