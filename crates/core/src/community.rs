//! Community hub content: suggested communities, engagement prompts, and
//! AI-styled post drafts.
//!
//! Joining and posting are acknowledged but never recorded.

use serde::Serialize;

use crate::error::{ALL_FIELDS, Error, Result, require};

/// Activity tag that switches the hub to the color-theory call to action.
pub const ILLUSTRATION_ACTIVITY: &str = "digital-illustration";

/// A community card shown in the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub members: u32,
    pub posts: u32,
    pub category: &'static str,
    pub tags: &'static [&'static str],
    pub recent_activity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_prompt: Option<&'static str>,
    /// Why the community is recommended; only set on suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_reason: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementPrompt {
    pub call_to_action: &'static str,
    pub suggested_action: &'static str,
}

/// Everything the hub page renders in one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSnapshot {
    pub my_communities: Vec<Community>,
    pub suggested_communities: Vec<Community>,
    pub overall_engagement_prompt: EngagementPrompt,
}

/// Success envelope for join and post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub status: &'static str,
    pub message: String,
}

impl Acknowledgement {
    fn success(message: String) -> Self {
        Self {
            status: "success",
            message,
        }
    }
}

/// A suggested post the learner can edit before sharing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub draft_title: &'static str,
    pub draft_content: &'static str,
}

const MY_COMMUNITIES: [Community; 1] = [Community {
    id: "digital-art-masters",
    name: "Digital Art Masters",
    description: "A community for advanced digital artists sharing techniques and masterpieces",
    members: 8500,
    posts: 420,
    category: "Digital Art",
    tags: &["Digital Art", "Advanced", "Techniques"],
    recent_activity: "2 hours ago",
    engagement_prompt: Some(
        "Share your latest digital artwork and get feedback from fellow masters!",
    ),
    ai_reason: None,
}];

const SUGGESTED_COMMUNITIES: [Community; 3] = [
    Community {
        id: "color-theory-hub",
        name: "Color Theory Enthusiasts",
        description: "Dive deep into color relationships, palettes, and psychological impact of colors",
        members: 5600,
        posts: 320,
        category: "Color Theory",
        tags: &["Color Theory", "Palettes", "Psychology"],
        recent_activity: "30 minutes ago",
        engagement_prompt: None,
        ai_reason: Some(
            "Perfect match for your current Unit 3: Color Theory progress in Digital Illustration Basics",
        ),
    },
    Community {
        id: "beginner-support",
        name: "Creative Beginners Circle",
        description: "A welcoming space for new artists to share work, ask questions, and grow together",
        members: 12800,
        posts: 890,
        category: "Beginner Friendly",
        tags: &["Beginner", "Support", "Learning"],
        recent_activity: "15 minutes ago",
        engagement_prompt: None,
        ai_reason: Some(
            "Great supportive community that matches your learning journey and skill development",
        ),
    },
    Community {
        id: "character-design-pro",
        name: "Character Design Professionals",
        description: "Professional character designers sharing industry insights and portfolio reviews",
        members: 4200,
        posts: 280,
        category: "Character Design",
        tags: &["Character Design", "Professional", "Portfolio"],
        recent_activity: "1 hour ago",
        engagement_prompt: None,
        ai_reason: Some("Recommended based on your Character Design Fundamentals course enrollment"),
    },
];

static ILLUSTRATION_DRAFT: PostDraft = PostDraft {
    draft_title: "Progress Update: Digital Illustration Fundamentals",
    draft_content: "Sharing my journey through the Digital Illustration Basics course! Currently working on color theory and loving how it's transforming my understanding of digital art.\n\nThe AI Practice Studio has been incredibly helpful for getting specific feedback on composition and technique. Each iteration suggestion opens up new creative possibilities.\n\nWould love to connect with others on similar learning paths. What's been your biggest breakthrough moment in digital art?",
};

static COLOR_THEORY_DRAFT: PostDraft = PostDraft {
    draft_title: "Seeking Feedback on My Color Theory Journey",
    draft_content: "Just completed Unit 3 of Digital Illustration Basics focusing on color theory! I've been experimenting with warm vs cool color relationships and creating mood-based palettes.\n\nThe AI feedback helped me understand how color temperature affects composition depth. I'm particularly excited about applying color psychology to my next project.\n\nWhat are your favorite techniques for creating harmonious color schemes? Any tips for a fellow learner?",
};

static CHARACTER_DRAFT: PostDraft = PostDraft {
    draft_title: "Character Anatomy Practice - Looking for Feedback",
    draft_content: "Working through Character Design Fundamentals and focusing on anatomy and proportions. The balance between realistic and stylized anatomy is fascinating!\n\nI've been practicing different character archetypes and how body language conveys personality. The AI assistant helped me understand how anatomical choices affect character appeal.\n\nAnyone else working on character design? I'd love to see your work and share feedback!",
};

static DRAFTS: [(&str, &PostDraft); 3] = [
    ("color-theory", &COLOR_THEORY_DRAFT),
    (ILLUSTRATION_ACTIVITY, &ILLUSTRATION_DRAFT),
    ("character-design", &CHARACTER_DRAFT),
];

/// Build the hub page for the learner's current activity.
pub fn hub_snapshot(activity: Option<&str>) -> HubSnapshot {
    let overall_engagement_prompt = if activity == Some(ILLUSTRATION_ACTIVITY) {
        EngagementPrompt {
            call_to_action: "Your color theory progress is impressive! Share your learning journey with the community.",
            suggested_action: "Create a post about your color theory discoveries",
        }
    } else {
        EngagementPrompt {
            call_to_action: "Feeling inspired? Share your progress or ask for feedback!",
            suggested_action: "Draft a post about your latest creative project",
        }
    };

    HubSnapshot {
        my_communities: MY_COMMUNITIES.to_vec(),
        suggested_communities: SUGGESTED_COMMUNITIES.to_vec(),
        overall_engagement_prompt,
    }
}

/// Acknowledge joining a community.
pub fn join(community_name: Option<&str>) -> Result<Acknowledgement> {
    let name = require(community_name, "Community name")?;
    tracing::info!(community = %name, "Community joined");
    Ok(Acknowledgement::success(format!(
        "Successfully joined {name}! Welcome to the community."
    )))
}

/// Acknowledge sharing a post. Every field is required.
pub fn publish(
    community_name: Option<&str>,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Acknowledgement> {
    match (
        require(community_name, "Community name"),
        require(title, "Post title"),
        require(content, "Post content"),
    ) {
        (Ok(name), Ok(title), Ok(_)) => {
            tracing::info!(community = %name, title_len = title.len(), "Post shared");
            Ok(Acknowledgement::success(format!(
                "Your post \"{title}\" has been shared in {name}!"
            )))
        }
        _ => Err(Error::missing(ALL_FIELDS)),
    }
}

/// Pick the draft for a project topic; unknown or absent topics get the
/// digital-illustration draft.
pub fn draft_for(project_topic: Option<&str>) -> &'static PostDraft {
    DRAFTS
        .iter()
        .find(|(key, _)| Some(*key) == project_topic)
        .map(|(_, draft)| *draft)
        .unwrap_or(&ILLUSTRATION_DRAFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_lists_communities() {
        let snapshot = hub_snapshot(None);
        assert_eq!(snapshot.my_communities.len(), 1);
        assert_eq!(snapshot.suggested_communities.len(), 3);
        assert!(snapshot.suggested_communities.iter().all(|c| c.ai_reason.is_some()));
        assert!(snapshot.my_communities[0].engagement_prompt.is_some());
    }

    #[test]
    fn illustration_activity_changes_call_to_action() {
        let focused = hub_snapshot(Some("digital-illustration"));
        assert!(focused
            .overall_engagement_prompt
            .call_to_action
            .contains("color theory progress"));

        let generic = hub_snapshot(Some("character-design"));
        assert!(generic
            .overall_engagement_prompt
            .call_to_action
            .starts_with("Feeling inspired?"));
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(hub_snapshot(None)).unwrap();
        assert!(json["myCommunities"][0]["recentActivity"].is_string());
        assert!(json["suggestedCommunities"][0]["aiReason"].is_string());
        assert!(json["suggestedCommunities"][0].get("engagementPrompt").is_none());
        assert!(json["overallEngagementPrompt"]["suggestedAction"].is_string());
    }

    #[test]
    fn join_acknowledges_by_name() {
        let ack = join(Some("Color Theory Enthusiasts")).unwrap();
        assert_eq!(ack.status, "success");
        assert_eq!(
            ack.message,
            "Successfully joined Color Theory Enthusiasts! Welcome to the community."
        );
    }

    #[test]
    fn join_requires_name() {
        let err = join(Some("")).unwrap_err();
        assert_eq!(err.to_string(), "Community name is required");
    }

    #[test]
    fn publish_requires_every_field() {
        let err = publish(Some("Digital Art Masters"), Some("My palette"), None).unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");

        let ack = publish(Some("Digital Art Masters"), Some("My palette"), Some("Warm vs cool")).unwrap();
        assert_eq!(
            ack.message,
            "Your post \"My palette\" has been shared in Digital Art Masters!"
        );
    }

    #[test]
    fn drafts_match_topic_exactly() {
        assert!(draft_for(Some("character-design")).draft_title.starts_with("Character Anatomy"));
        assert!(draft_for(Some("color-theory")).draft_title.contains("Color Theory"));
        assert!(draft_for(Some("Color-Theory")).draft_title.starts_with("Progress Update"));
        assert!(draft_for(None).draft_title.starts_with("Progress Update"));
    }
}
