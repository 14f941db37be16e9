//! Content pools consumed by the overlay systems
//!
//! The compositor treats all of this as opaque text. A missing pool is an
//! empty list, and a system fed by an empty list simply never spawns.

use std::collections::{BTreeMap, HashMap};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::overlay::Channel;

/// A (sender, text) pair shown in a toast or modal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
}

impl Message {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// A full mail that can be opened in a detail window and replied to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mail {
    pub sender: String,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// Phone caller identity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub name: String,
    pub number: String,
}

/// Who speaks a line of a call script
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Caller,
    Player,
}

/// One line of a call script
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub speaker: Speaker,
    pub text: String,
}

impl ScriptLine {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    /// Length in revealable characters
    #[inline]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// All static content the simulation draws from
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPools {
    pub mail: Vec<Message>,
    pub discord: Vec<Message>,
    pub messages: Vec<Message>,
    pub slack: Vec<Message>,
    pub modal_messages: Vec<Message>,
    pub callers: Vec<Caller>,
    /// Caller-specific scripts keyed by caller name
    pub scripts: HashMap<String, Vec<ScriptLine>>,
    pub default_script: Vec<ScriptLine>,
    pub activities: Vec<String>,
    pub congratulations: Vec<Mail>,
    pub milestones: BTreeMap<u32, String>,
    /// Display name of the coworker behind activity events and the modal
    pub coworker: String,
}

impl ContentPools {
    /// Pools with nothing in them; every spawner stays silent
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse content from JSON; absent pools are empty
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let pools: ContentPools = serde_json::from_str(json)?;
        if let Some((caller, _)) = pools.scripts.iter().find(|(_, lines)| lines.is_empty()) {
            return Err(ContentError::EmptyScript(caller.clone()));
        }
        Ok(pools)
    }

    /// Like [`from_json`](Self::from_json) but falls back to the built-in set
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(pools) => pools,
            Err(error) => {
                warn!("failed to load content pools: {error}; using built-in content");
                Self::builtin()
            }
        }
    }

    /// Toast pool for a channel
    pub fn pool(&self, channel: Channel) -> &[Message] {
        match channel {
            Channel::Mail => &self.mail,
            Channel::Discord => &self.discord,
            Channel::Messages => &self.messages,
            Channel::Slack => &self.slack,
        }
    }

    /// Script for a caller, falling back to the default script
    pub fn script_for(&self, caller: &str) -> &[ScriptLine] {
        match self.scripts.get(caller) {
            Some(lines) if !lines.is_empty() => lines,
            _ => &self.default_script,
        }
    }

    /// Banner text for a milestone threshold
    pub fn milestone_text(&self, threshold: u32) -> String {
        self.milestones
            .get(&threshold)
            .cloned()
            .unwrap_or_else(|| format!("{}% Complete!", threshold))
    }

    /// Small shipped content set
    pub fn builtin() -> Self {
        let coworker = "Calvelli".to_string();

        let mail = [
            ("conference@org.com", "Conference Planning Update"),
            ("sponsors@conference.org", "Sponsor Meeting Tomorrow"),
            ("finance@conference.org", "Budget Review Needed"),
            ("venue@conference.org", "Venue Confirmation"),
            ("volunteers@conference.org", "Volunteer Schedule"),
            ("halle@conference.org", "Quick Question"),
        ]
        .into_iter()
        .map(|(s, t)| Message::new(s, t))
        .collect();

        let discord = [
            ("seong-ah", "Hey, can you check the budget?"),
            ("jar", "We need to update the sponsor list"),
            ("halle", "When are you going to finish that?"),
            ("fleece", "Hey Matt, status update?"),
        ]
        .into_iter()
        .map(|(s, t)| Message::new(s, t))
        .collect();

        let messages = [
            ("mama velli", "Are you eating enough?"),
            ("seong-ah", "Did you see the venue photos?"),
            ("jar", "lunch?"),
            ("fleece", "call me when you're free"),
        ]
        .into_iter()
        .map(|(s, t)| Message::new(s, t))
        .collect();

        let slack = [
            ("manon", "Reminder: standup in 5"),
            ("julian", "Can someone review the sponsor deck?"),
            ("halle", "Posted the new schedule in #conference-planning"),
        ]
        .into_iter()
        .map(|(s, t)| Message::new(s, t))
        .collect();

        let modal_messages = [
            "Hey Matt, can you check the budget spreadsheet?",
            "Matt, did you send those emails yet?",
            "Hey, we need to update the sponsor list",
            "Matt, when are you going to finish the donation forms?",
            "Can you look at the calendar? We have a meeting soon",
            "Hey, the tasks list needs updating",
            "Matt, are you there? We need to discuss the conference",
            "Can you check the contact info? Something's wrong",
            "Hey Matt, I need your help with something",
            "Matt, we're running out of time on this",
        ]
        .into_iter()
        .map(|t| Message::new(coworker.clone(), t))
        .collect();

        let callers = [
            ("Mama Velli", "(555) 201-3344"),
            ("Michael Miske", "(555) 867-5309"),
            ("Seong-ah", "(555) 410-2288"),
        ]
        .into_iter()
        .map(|(name, number)| Caller {
            name: name.to_string(),
            number: number.to_string(),
        })
        .collect();

        let mut scripts = HashMap::new();
        scripts.insert(
            "Mama Velli".to_string(),
            vec![
                ScriptLine::new(Speaker::Caller, "Honey, are you working hard?"),
                ScriptLine::new(Speaker::Player, "So hard, Mom."),
                ScriptLine::new(Speaker::Caller, "Calvelli says hi!"),
            ],
        );

        let default_script = vec![
            ScriptLine::new(Speaker::Caller, "Hey, how's the conference planning going?"),
            ScriptLine::new(Speaker::Player, "Oh, it's going great! I've been working on it all day."),
            ScriptLine::new(Speaker::Caller, "That's awesome! Need any help with anything?"),
            ScriptLine::new(Speaker::Player, "Nah, I've got it covered. Thanks though!"),
            ScriptLine::new(Speaker::Caller, "Alright, well keep up the good work!"),
        ];

        let activities = [
            "Calvelli secured a $5,000 sponsorship",
            "Calvelli finalized the venue booking",
            "Calvelli sent out 50 fundraising emails",
            "Calvelli updated the budget spreadsheet",
            "Calvelli confirmed 3 keynote speakers",
            "Calvelli organized the catering menu",
            "Calvelli set up the registration system",
            "Calvelli coordinated with 10 vendors",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let congratulations = vec![
            Mail {
                sender: "michael miske <michael.miske@conference.org>".to_string(),
                subject: "Calvelli is doing amazing work!".to_string(),
                body: "Hey Matt, just wanted to say that Calvelli has been absolutely \
                       crushing it with the conference planning."
                    .to_string(),
                responses: vec![
                    "Thanks! Yes, Calvelli is great.".to_string(),
                    "I'll let them know you said that.".to_string(),
                    "We're making good progress!".to_string(),
                ],
            },
            Mail {
                sender: "venue@conference.org".to_string(),
                subject: "Venue coordination going smoothly".to_string(),
                body: "Hi Matt, everything with the venue is set. Calvelli has been \
                       incredibly organized and responsive."
                    .to_string(),
                responses: vec![
                    "Great to hear!".to_string(),
                    "Calvelli is very organized.".to_string(),
                    "Thanks for the update.".to_string(),
                ],
            },
        ];

        let milestones = [
            (25, "25% Complete! Great progress!"),
            (50, "50% Complete! Halfway there!"),
            (75, "75% Complete! Almost done!"),
            (90, "90% Complete! Final stretch!"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect();

        Self {
            mail,
            discord,
            messages,
            slack,
            modal_messages,
            callers,
            scripts,
            default_script,
            activities,
            congratulations,
            milestones,
            coworker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_pools_are_empty() {
        let pools = ContentPools::from_json(r#"{ "activities": ["did a thing"] }"#).unwrap();
        assert_eq!(pools.activities.len(), 1);
        assert!(pools.mail.is_empty());
        assert!(pools.callers.is_empty());
        assert!(pools.pool(Channel::Slack).is_empty());
    }

    #[test]
    fn test_script_fallback() {
        let pools = ContentPools::builtin();
        assert_eq!(pools.script_for("Mama Velli").len(), 3);
        assert_eq!(pools.script_for("Nobody").len(), 5);
    }

    #[test]
    fn test_empty_script_rejected() {
        let json = r#"{ "scripts": { "Ghost": [] } }"#;
        assert_eq!(
            ContentPools::from_json(json),
            Err(ContentError::EmptyScript("Ghost".to_string()))
        );
    }

    #[test]
    fn test_milestone_text_fallback() {
        let pools = ContentPools::builtin();
        assert_eq!(pools.milestone_text(50), "50% Complete! Halfway there!");
        assert_eq!(ContentPools::empty().milestone_text(60), "60% Complete!");
    }

    #[test]
    fn test_char_len_counts_unicode_scalars() {
        let line = ScriptLine::new(Speaker::Caller, "héllo");
        assert_eq!(line.char_len(), 5);
    }

    #[test]
    fn test_or_default_uses_builtin() {
        let pools = ContentPools::from_json_or_default("{");
        assert_eq!(pools.coworker, "Calvelli");
        assert_eq!(pools.modal_messages.len(), 10);
    }
}
