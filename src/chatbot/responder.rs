/// What a visitor is asking about, in rule priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Services,
    Contact,
    Pricing,
    Unknown,
}

enum Pattern {
    /// Matches only a whole word, so "hi" doesn't fire on "this".
    Word(&'static str),
    /// Matches anywhere, so "pric" catches "price", "prices" and "pricing".
    Contains(&'static str),
}

struct Rule {
    topic: Topic,
    patterns: &'static [Pattern],
    reply: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        topic: Topic::Greeting,
        patterns: &[Pattern::Contains("hello"), Pattern::Word("hi"), Pattern::Word("hey")],
        reply: "Hello! Ready to create something amazing?",
    },
    Rule {
        topic: Topic::Services,
        patterns: &[Pattern::Contains("service"), Pattern::Contains("offer")],
        reply: "We offer Web Development, UI/UX Design, and digital branding services.",
    },
    Rule {
        topic: Topic::Contact,
        patterns: &[Pattern::Contains("contact"), Pattern::Contains("email")],
        reply: "You can reach us at contact@zyntex.com or use the contact form on this page.",
    },
    Rule {
        topic: Topic::Pricing,
        patterns: &[
            Pattern::Contains("pric"),
            Pattern::Contains("cost"),
            Pattern::Contains("charge"),
            Pattern::Contains("quote"),
        ],
        reply: "Our pricing depends on the project scope. Let's chat about your requirements!",
    },
];

pub const FALLBACK_REPLY: &str =
    "Thanks for your message! This is a demo bot, but a real human will be with you shortly if you leave your contact info.";

pub const WELCOME: &str = "Hi there! 👋 Welcome to Zyntex Infosoft. How can I help you today?";

impl Pattern {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Pattern::Contains(needle) => lowered.contains(needle),
            Pattern::Word(word) => lowered
                .split(|c: char| !c.is_alphanumeric())
                .any(|w| w == *word),
        }
    }
}

/// First rule with a matching pattern wins; there is no scoring.
pub fn classify(text: &str) -> Topic {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| p.matches(&lowered)))
        .map(|rule| rule.topic)
        .unwrap_or(Topic::Unknown)
}

pub fn reply_for(topic: Topic) -> &'static str {
    RULES
        .iter()
        .find(|rule| rule.topic == topic)
        .map(|rule| rule.reply)
        .unwrap_or(FALLBACK_REPLY)
}

pub fn respond(text: &str) -> &'static str {
    reply_for(classify(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting() {
        assert_eq!(classify("Hello there"), Topic::Greeting);
        assert_eq!(respond("Hello there"), reply_for(Topic::Greeting));
        assert_eq!(classify("hey!"), Topic::Greeting);
    }

    #[test]
    fn pricing() {
        assert_eq!(respond("what do you charge"), reply_for(Topic::Pricing));
        assert_eq!(classify("PRICING please"), Topic::Pricing);
        assert_eq!(classify("send me your prices"), Topic::Pricing);
        assert_eq!(classify("what's the price?"), Topic::Pricing);
    }

    #[test]
    fn unmatched_input_falls_back() {
        assert_eq!(respond("xyzzy"), FALLBACK_REPLY);
        assert_eq!(respond(""), FALLBACK_REPLY);
        assert_eq!(classify("xyzzy"), Topic::Unknown);
    }

    #[test]
    fn first_matching_rule_wins() {
        assert_eq!(classify("hi, what do your services cost?"), Topic::Greeting);
        assert_eq!(classify("which services cost the least"), Topic::Services);
    }

    #[test]
    fn short_greetings_need_whole_words() {
        assert_eq!(classify("this thing"), Topic::Unknown);
        assert_eq!(classify("whichever"), Topic::Unknown);
    }

    #[test]
    fn every_topic_has_a_distinct_reply() {
        let topics = [Topic::Greeting, Topic::Services, Topic::Contact, Topic::Pricing];
        for (i, a) in topics.iter().enumerate() {
            for b in &topics[i + 1..] {
                assert_ne!(reply_for(*a), reply_for(*b));
            }
            assert_ne!(reply_for(*a), FALLBACK_REPLY);
        }
    }
}
