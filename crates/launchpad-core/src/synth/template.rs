//! Deterministic template synthesizer.
//!
//! Builds a shared header from the request (with fixed fallbacks for empty
//! answers) and appends one of three fixed bodies: a tactical content
//! calendar, a drip campaign, and a measurement plan. The only side effect
//! is the simulated latency in [`TemplateSynthesizer::generate`].

use std::time::Duration;

use async_trait::async_trait;

use super::SynthesisError;
use super::request::{PlanRequest, PlanSet};
use super::trait_def::PlanSynthesizer;

/// Latency the template waits before answering, standing in for a backend.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1200);

const DEFAULT_GOAL: &str = "Grow awareness";
const DEFAULT_AUDIENCE: &str = "Local customers";
const DEFAULT_TONE: &str = "Friendly";
const DEFAULT_UNIQUE: &str = "Authentic, local, quality";
const DEFAULT_CHANNELS: &str = "Instagram, Facebook";
const DEFAULT_BUDGET: &str = "Not specified";
const DEFAULT_TIMEFRAME: &str = "4–6 weeks";
const DEFAULT_HOOK_TIMEFRAME: &str = "30 days";
const DEFAULT_OFFER: &str = "Limited-time special to drive trial and foot traffic.";

const PREMIUM_TONE: &str = "Premium & luxury";
const PREMIUM_TAGLINE: &str = "Crafted for connoisseurs.";
const DEFAULT_TAGLINE: &str = "Fresh. Local. Yours.";

/// Template-based [`PlanSynthesizer`].
#[derive(Debug, Clone)]
pub struct TemplateSynthesizer {
    latency: Duration,
}

impl Default for TemplateSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl TemplateSynthesizer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// A synthesizer that answers immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl PlanSynthesizer for TemplateSynthesizer {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(&self, request: &PlanRequest) -> Result<PlanSet, SynthesisError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(render_plans(request))
    }
}

/// Render the three plans for `request`. Pure: equal input, equal output.
pub fn render_plans(request: &PlanRequest) -> PlanSet {
    let header = render_header(request);
    PlanSet::new([
        format!("{header}{}", content_calendar(request)),
        format!("{header}{}", drip_campaign(request)),
        format!("{header}{}", measurement_plan()),
    ])
}

fn render_header(request: &PlanRequest) -> String {
    let PlanRequest {
        business,
        campaign,
        brand,
        delivery,
    } = request;

    let audience = business.customers.join(", ");
    let channels = if delivery.channels.is_empty() {
        DEFAULT_CHANNELS.to_string()
    } else {
        delivery.channels.join(", ")
    };

    format!(
        "# Example Custom Marketing Plan\n\
         Business: {}\n\
         Goal: {}\n\
         Audience: {}\n\
         Tone: {}\n\
         Unique: {}\n\
         Channels: {}\n\
         Budget: {} | Timeframe: {}\n\n",
        business.name_and_offer,
        or_default(&campaign.goal, DEFAULT_GOAL),
        or_default(&audience, DEFAULT_AUDIENCE),
        or_default(&brand.tone, DEFAULT_TONE),
        or_default(&brand.unique, DEFAULT_UNIQUE),
        channels,
        or_default(&delivery.budget, DEFAULT_BUDGET),
        or_default(&delivery.timeframe, DEFAULT_TIMEFRAME),
    )
}

fn content_calendar(request: &PlanRequest) -> String {
    let tagline = if request.brand.tone == PREMIUM_TONE {
        PREMIUM_TAGLINE
    } else {
        DEFAULT_TAGLINE
    };

    format!(
        "Tagline:\n\"{tagline}\"\n\n\
         Primary Offer:\n{offer}\n\n\
         Platform Strategy:\n{strategy}\n\n\
         Content Types & Why It Works:\n{why}\n\n\
         What to Post This Week:\n{posts}\n",
        offer = or_default(&request.campaign.offer, DEFAULT_OFFER),
        strategy = bullets(&[
            "Instagram Reels: 15–30s reels showing product/people behind the scenes",
            "Facebook Events: create a kick-off event with invite link",
            "Google Business Profile: fresh photos + weekly updates",
            "Email: weekly short tips + the offer",
        ]),
        why = bullets(&[
            "Short-form video boosts reach & recall",
            "Events create urgency and social proof",
            "GBP posts help local SEO",
        ]),
        posts = bullets(&[
            "Teaser reel announcing the offer",
            "Carousel: ‘3 reasons locals love us’",
            "Story poll about flavors/options",
        ]),
    )
}

fn drip_campaign(request: &PlanRequest) -> String {
    format!(
        "Campaign Hook:\n\"{goal} — in {timeframe}\"\n\n\
         Drip Sequence (Email/SMS):\n{drip}\n\n\
         Local Partnerships:\n{partners}\n",
        goal = or_default(&request.campaign.goal, DEFAULT_GOAL),
        timeframe = or_default(&request.delivery.timeframe, DEFAULT_HOOK_TIMEFRAME),
        drip = bullets(&[
            "Week 1: announce offer + simple CTA",
            "Week 2: social proof + UGC",
            "Week 3: behind-the-scenes + reminder",
            "Final 72h: countdown + scarcity",
        ]),
        partners = bullets(&[
            "Cross-promote with 1–2 nearby brands",
            "Bundle giveaway with co-branded reel",
        ]),
    )
}

fn measurement_plan() -> String {
    format!(
        "Measurement Plan:\n{measure}\n\n\
         Optimization:\n{optimize}\n",
        measure = bullets(&[
            "Track clicks from Instagram bio + story link",
            "Use unique code for in-store redemptions",
            "Weekly KPI review: reach, CTR, redemptions",
        ]),
        optimize = bullets(&[
            "Double-down on top post format",
            "Adjust spend by CPA on the best channel",
        ]),
    )
}

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerRecord;

    fn empty_request() -> PlanRequest {
        PlanRequest::from(&AnswerRecord::default())
    }

    #[test]
    fn header_falls_back_to_defaults() {
        let plans = render_plans(&empty_request());
        let first = plans.get(0).unwrap();
        assert!(first.starts_with("# Example Custom Marketing Plan\nBusiness: \n"));
        assert!(first.contains("Goal: Grow awareness\n"));
        assert!(first.contains("Audience: Local customers\n"));
        assert!(first.contains("Tone: Friendly\n"));
        assert!(first.contains("Unique: Authentic, local, quality\n"));
        assert!(first.contains("Channels: Instagram, Facebook\n"));
        assert!(first.contains("Budget: Not specified | Timeframe: 4–6 weeks\n\n"));
    }

    #[test]
    fn every_plan_shares_the_header() {
        let request = empty_request();
        let header = render_header(&request);
        for plan in render_plans(&request).as_slice() {
            assert!(plan.starts_with(&header));
        }
    }

    #[test]
    fn bodies_are_distinct_angles() {
        let plans = render_plans(&empty_request());
        assert!(plans.get(0).unwrap().contains("Platform Strategy:\n• Instagram Reels"));
        assert!(plans.get(1).unwrap().contains("Drip Sequence (Email/SMS):\n• Week 1"));
        assert!(plans.get(2).unwrap().contains("Measurement Plan:\n• Track clicks"));
        assert!(plans.get(2).unwrap().ends_with("• Adjust spend by CPA on the best channel\n"));
    }

    #[test]
    fn tagline_depends_on_premium_tone() {
        let mut request = empty_request();
        assert!(render_plans(&request).get(0).unwrap().contains("\"Fresh. Local. Yours.\""));

        request.brand.tone = "Premium & luxury".to_string();
        assert!(
            render_plans(&request)
                .get(0)
                .unwrap()
                .contains("\"Crafted for connoisseurs.\"")
        );
    }

    #[test]
    fn primary_offer_defaults_when_empty() {
        let mut request = empty_request();
        assert!(
            render_plans(&request)
                .get(0)
                .unwrap()
                .contains("Primary Offer:\nLimited-time special to drive trial and foot traffic.\n")
        );

        request.campaign.offer = "Free refills".to_string();
        assert!(render_plans(&request).get(0).unwrap().contains("Primary Offer:\nFree refills\n"));
    }

    #[test]
    fn hook_uses_goal_and_thirty_day_fallback() {
        let mut request = empty_request();
        request.campaign.goal = "Promote an event".to_string();
        let plans = render_plans(&request);
        assert!(plans.get(1).unwrap().contains("\"Promote an event — in 30 days\""));

        request.delivery.timeframe = "2 weeks".to_string();
        let plans = render_plans(&request);
        assert!(plans.get(1).unwrap().contains("\"Promote an event — in 2 weeks\""));
    }

    #[tokio::test]
    async fn instant_synthesizer_matches_render() {
        let request = empty_request();
        let synth = TemplateSynthesizer::instant();
        assert_eq!(synth.latency(), Duration::ZERO);
        assert_eq!(synth.name(), "template");
        let plans = synth.generate(&request).await.unwrap();
        assert_eq!(plans, render_plans(&request));
    }

    #[test]
    fn default_latency_is_one_point_two_seconds() {
        assert_eq!(TemplateSynthesizer::default().latency(), Duration::from_millis(1200));
    }
}
