//! The twelve wizard steps and their advance predicates.

use crate::answers::{AnswerRecord, MAX_CHANNELS};

/// Number of form steps. Index `TOTAL_STEPS` itself means "results".
pub const TOTAL_STEPS: usize = 12;

/// A form step, in presentation order.
///
/// ```text
///  0 Welcome          4 MainGoal        8 Unique
///  1 BusinessName     5 SpecialOffer    9 DeliveryIntro
///  2 Customers        6 BrandIntro     10 Channels
///  3 GoalsIntro       7 Tone           11 BudgetTimeframe
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Welcome,
    BusinessName,
    Customers,
    GoalsIntro,
    MainGoal,
    SpecialOffer,
    BrandIntro,
    Tone,
    Unique,
    DeliveryIntro,
    Channels,
    BudgetTimeframe,
}

impl Step {
    pub const ALL: [Step; TOTAL_STEPS] = [
        Step::Welcome,
        Step::BusinessName,
        Step::Customers,
        Step::GoalsIntro,
        Step::MainGoal,
        Step::SpecialOffer,
        Step::BrandIntro,
        Step::Tone,
        Step::Unique,
        Step::DeliveryIntro,
        Step::Channels,
        Step::BudgetTimeframe,
    ];

    pub const FIRST: Step = Step::Welcome;
    pub const LAST: Step = Step::BudgetTimeframe;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    /// The following step, saturating at [`Step::LAST`].
    pub fn next(self) -> Step {
        Self::from_index(self.index() + 1).unwrap_or(Self::LAST)
    }

    /// The preceding step, saturating at [`Step::FIRST`].
    pub fn prev(self) -> Step {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Self::FIRST)
    }

    /// Section screens that only carry a heading and a "Next" button.
    pub fn is_interstitial(self) -> bool {
        matches!(
            self,
            Step::Welcome | Step::GoalsIntro | Step::BrandIntro | Step::DeliveryIntro
        )
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Welcome => "Welcome to Your Rocketship",
            Step::BusinessName => "Business Name & What You Offer",
            Step::Customers => "Your Main Customers (select one or more)",
            Step::GoalsIntro => "Your Campaign Goals",
            Step::MainGoal => "Main Goal",
            Step::SpecialOffer => "Special Offer or Event to Highlight?",
            Step::BrandIntro => "Your Brand Personality",
            Step::Tone => "Tone & Style",
            Step::Unique => "What Makes You Unique?",
            Step::DeliveryIntro => "Delivery Details",
            Step::Channels => "Where Should We Promote This? (select up to 3)",
            Step::BudgetTimeframe => "Budget & Time-frame",
        }
    }

    /// Example text shown in an empty input on this step.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Step::BusinessName => Some("Ex: Joe's Coffee — small-batch local coffee shop"),
            Step::Customers => Some("Enter customer"),
            Step::MainGoal => Some("Enter goal"),
            Step::SpecialOffer => Some("Ex: 20% off all drinks this week"),
            Step::Unique => Some("Ex: Only organic beans roasted in-house"),
            _ => None,
        }
    }
}

/// Placeholder for the budget input on [`Step::BudgetTimeframe`].
pub const BUDGET_PLACEHOLDER: &str = "Ex: $500";
/// Placeholder for the timeframe input on [`Step::BudgetTimeframe`].
pub const TIMEFRAME_PLACEHOLDER: &str = "Ex: 1 month";

/// Whether the user may leave `step` going forward with `record` as it is.
pub fn can_advance(step: Step, record: &AnswerRecord) -> bool {
    match step {
        Step::BusinessName => record.business_name.trim().chars().count() > 2,
        Step::Customers => {
            !record.main_customers.is_empty() || !record.custom_customer.trim().is_empty()
        }
        Step::MainGoal => record.main_goal.is_some() || !record.custom_goal.trim().is_empty(),
        Step::SpecialOffer => !record.special_offer.trim().is_empty(),
        Step::Tone => record.tone.is_some(),
        Step::Unique => !record.unique.trim().is_empty(),
        Step::Channels => (1..=MAX_CHANNELS).contains(&record.channels.len()),
        Step::BudgetTimeframe => !record.budget.is_empty() && !record.timeframe.is_empty(),
        Step::Welcome | Step::GoalsIntro | Step::BrandIntro | Step::DeliveryIntro => true,
    }
}
