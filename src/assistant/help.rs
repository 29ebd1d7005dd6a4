// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::controller::AssistantController;
use super::response::ContextMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSection {
    Hero,
    About,
    Problems,
    Fund,
    Join,
}

impl PageSection {
    pub const ALL: [Self; 5] = [Self::Hero, Self::About, Self::Problems, Self::Fund, Self::Join];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Problems => "problems",
            Self::Fund => "fund",
            Self::Join => "join",
        }
    }
}

impl fmt::Display for PageSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|section| section.as_str() == s).ok_or_else(|| s.to_owned())
    }
}

/// A hint shown next to a page section; accepting it opens the assistant in `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextualTip {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
    pub mode: ContextMode,
}

const HERO_TIPS: &[ContextualTip] = &[ContextualTip {
    id: "welcome",
    title: "Welcome to GILC",
    description: "Start by exploring our logic problems or asking GPT about mathematical concepts.",
    action: "Ask GPT about GILC",
    mode: ContextMode::General,
}];

const ABOUT_TIPS: &[ContextualTip] = &[ContextualTip {
    id: "mission",
    title: "Our Mission",
    description: "Learn more about our methodological framework and cybernetic principles.",
    action: "Explain cybernetic epistemology",
    mode: ContextMode::Research,
}];

const PROBLEMS_TIPS: &[ContextualTip] = &[
    ContextualTip {
        id: "proof-help",
        title: "Need Proof Help?",
        description: "Use our GPT Proof Assistant to validate logical steps and get suggestions.",
        action: "Start proof assistance",
        mode: ContextMode::Proof,
    },
    ContextualTip {
        id: "problem-analysis",
        title: "Problem Analysis",
        description: "Get GPT to break down complex mathematical problems into manageable steps.",
        action: "Analyze problem structure",
        mode: ContextMode::Research,
    },
];

const FUND_TIPS: &[ContextualTip] = &[ContextualTip {
    id: "funding-logic",
    title: "Funding Logic",
    description: "Understand how our quantum harmonic funding model works.",
    action: "Explain funding model",
    mode: ContextMode::General,
}];

const JOIN_TIPS: &[ContextualTip] = &[ContextualTip {
    id: "contribution",
    title: "How to Contribute",
    description: "Learn about different ways to contribute to the GILC frontier.",
    action: "Show contribution paths",
    mode: ContextMode::General,
}];

pub fn tips_for(section: PageSection) -> &'static [ContextualTip] {
    match section {
        PageSection::Hero => HERO_TIPS,
        PageSection::About => ABOUT_TIPS,
        PageSection::Problems => PROBLEMS_TIPS,
        PageSection::Fund => FUND_TIPS,
        PageSection::Join => JOIN_TIPS,
    }
}

/// Per-section tip presenter. Only the first tip is offered; once dismissed nothing is shown
/// again for the section.
#[derive(Debug, Clone)]
pub struct ContextualHelp {
    section: PageSection,
    current: Option<&'static ContextualTip>,
    dismissed: bool,
}

impl ContextualHelp {
    pub fn new(section: PageSection) -> Self {
        Self { section, current: None, dismissed: false }
    }

    pub fn section(&self) -> PageSection {
        self.section
    }

    /// Called when the reveal delay elapses.
    pub fn reveal(&mut self) -> Option<&'static ContextualTip> {
        if self.dismissed {
            return None;
        }
        self.current = tips_for(self.section).first();
        self.current
    }

    pub fn current(&self) -> Option<&'static ContextualTip> {
        self.current
    }

    pub fn dismiss(&mut self) {
        self.current = None;
        self.dismissed = true;
    }

    /// Open the assistant in the current tip's mode and hide the tip.
    pub fn accept(&mut self, controller: &AssistantController) -> bool {
        let Some(tip) = self.current.take() else {
            return false;
        };
        controller.open(Some(tip.mode.tag()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{tips_for, ContextualHelp, PageSection};
    use crate::assistant::{AssistantController, ContextMode};
    use crate::config::AssistantConfig;

    #[test]
    fn every_section_has_a_tip() {
        for section in PageSection::ALL {
            assert!(!tips_for(section).is_empty(), "{section} has no tips");
        }
    }

    #[test]
    fn section_parses_from_its_name() {
        assert_eq!("problems".parse::<PageSection>(), Ok(PageSection::Problems));
        assert!("footer".parse::<PageSection>().is_err());
    }

    #[test]
    fn accepting_a_tip_opens_the_assistant_in_its_mode() {
        let controller = AssistantController::new(AssistantConfig::default());
        let mut help = ContextualHelp::new(PageSection::Problems);

        let tip = help.reveal().expect("tip");
        assert_eq!(tip.mode, ContextMode::Proof);
        assert!(help.accept(&controller));

        let session = controller.snapshot();
        assert!(session.is_open());
        assert_eq!(session.active_context(), Some("proof"));
        assert!(help.current().is_none());
        assert!(!help.accept(&controller));
    }

    #[test]
    fn dismissed_help_stays_hidden() {
        let mut help = ContextualHelp::new(PageSection::Hero);
        help.reveal();
        help.dismiss();
        assert!(help.reveal().is_none());
    }
}
