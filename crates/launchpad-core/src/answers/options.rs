//! Closed choice lists offered by the wizard.
//!
//! Every enumerated answer (customers, goals, tones, channels) is one of a
//! fixed set of labels. The label is what the user sees, what the answers
//! file contains, and what the synthesizer receives. Labels are parsed with
//! `FromStr`, ignoring ASCII case and surrounding whitespace.

use std::fmt;
use std::str::FromStr;

/// Error returned when a label does not name any option of a choice list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?} (expected one of: {expected})")]
pub struct OptionParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! choice_list {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every option, in the order the wizard presents them.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The user-facing label.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = OptionParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|opt| opt.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| OptionParseError {
                        kind: $kind,
                        value: s.to_owned(),
                        expected: Self::ALL
                            .iter()
                            .map(|opt| opt.label())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

choice_list! {
    /// Customer groups for the "Main customers" step.
    Customer, "customer" {
        FamiliesParents => "Families/Parents",
        Students => "Students",
        Professionals => "Professionals",
        Seniors => "Seniors",
        Tourists => "Tourists",
        OnlineShoppers => "Online Shoppers",
    }
}

choice_list! {
    /// Campaign goals for the "Main goal" step.
    Goal, "goal" {
        NewCustomers => "Get new customers",
        OnlineSales => "Increase online sales",
        PromoteEvent => "Promote an event",
        GrowFollowing => "Grow my social media following",
        PromoteSale => "Promote a sale or special offer",
    }
}

choice_list! {
    /// Brand tones for the "Tone & style" step.
    Tone, "tone" {
        FriendlyCasual => "Friendly & casual",
        Professional => "Professional & trustworthy",
        PremiumLuxury => "Premium & luxury",
        FunCreative => "Fun & creative",
    }
}

choice_list! {
    /// Promotion channels for the "Where should we promote this?" step.
    Channel, "channel" {
        Instagram => "Instagram",
        Facebook => "Facebook",
        LocalPress => "Local press/flyers",
        EmailNewsletter => "Email newsletter",
        GoogleBusiness => "Google Business/Maps",
        TikTok => "TikTok",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip_through_from_str() {
        for tone in Tone::ALL {
            assert_eq!(tone.label().parse::<Tone>().unwrap(), *tone);
        }
        for channel in Channel::ALL {
            assert_eq!(channel.to_string().parse::<Channel>().unwrap(), *channel);
        }
    }

    #[test]
    fn from_str_ignores_case_and_padding() {
        assert_eq!(" tiktok ".parse::<Channel>().unwrap(), Channel::TikTok);
        assert_eq!(
            "families/parents".parse::<Customer>().unwrap(),
            Customer::FamiliesParents
        );
    }

    #[test]
    fn from_str_lists_expected_labels_on_error() {
        let err = "Myspace".parse::<Channel>().unwrap_err();
        assert_eq!(err.kind, "channel");
        let msg = err.to_string();
        assert!(msg.contains("\"Myspace\""), "unexpected error: {msg}");
        assert!(msg.contains("Google Business/Maps"), "unexpected error: {msg}");
    }

    #[test]
    fn option_counts_match_the_wizard_screens() {
        assert_eq!(Customer::ALL.len(), 6);
        assert_eq!(Goal::ALL.len(), 5);
        assert_eq!(Tone::ALL.len(), 4);
        assert_eq!(Channel::ALL.len(), 6);
    }
}
