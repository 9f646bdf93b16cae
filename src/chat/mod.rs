//! Chat assistant
//!
//! Keyword lookup over canned replies. Randomness comes from the caller's
//! `Rng` so a seeded generator gives reproducible answers.

pub mod responses;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use responses::{ENERGY_TIPS, GENERIC_PREFIX, GREETINGS, GREETING_REPLY, GREETING_SUGGESTIONS, TOPIC_REPLIES};

/// Number of tips offered as follow-up suggestions
const SUGGESTED_TIPS: usize = 2;

/// How a message was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Topic(&'static str),
    Greeting,
    Generic,
}

/// Assistant reply with follow-up suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub suggestions: Vec<String>,
}

fn find_topic(lower: &str) -> Option<&'static (&'static str, [&'static str; 2])> {
    TOPIC_REPLIES.iter().find(|(keyword, _)| lower.contains(*keyword))
}

/// Classify a user message. Topics are checked before greetings.
pub fn classify(message: &str) -> ReplyKind {
    let lower = message.to_lowercase();

    if let Some((keyword, _)) = find_topic(&lower) {
        return ReplyKind::Topic(*keyword);
    }

    if GREETINGS.iter().any(|greeting| lower.contains(*greeting)) {
        return ReplyKind::Greeting;
    }

    ReplyKind::Generic
}

/// Distinct random tips
pub fn random_tips<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    ENERGY_TIPS
        .choose_multiple(rng, count)
        .map(|tip| tip.to_string())
        .collect()
}

/// Build the assistant reply for a user message
pub fn reply<R: Rng + ?Sized>(message: &str, rng: &mut R) -> ChatReply {
    let lower = message.to_lowercase();

    if let Some((_, replies)) = find_topic(&lower) {
        let message = replies[rng.gen_range(0..replies.len())];
        return ChatReply {
            message: message.to_string(),
            suggestions: random_tips(rng, SUGGESTED_TIPS),
        };
    }

    match classify(message) {
        ReplyKind::Greeting => ChatReply {
            message: GREETING_REPLY.to_string(),
            suggestions: GREETING_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        },
        _ => {
            let tip = ENERGY_TIPS[rng.gen_range(0..ENERGY_TIPS.len())];
            ChatReply {
                message: format!("{GENERIC_PREFIX}{tip}"),
                suggestions: random_tips(rng, SUGGESTED_TIPS),
            }
        }
    }
}
