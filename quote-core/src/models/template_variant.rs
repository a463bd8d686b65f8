use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two fixed visual layouts a quote can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemplateVariant {
    /// Single-language dealer layout with signature lines.
    #[default]
    #[serde(rename = "template1")]
    DealerStyle,
    /// Italian/German distributor layout with a tax summary table.
    #[serde(rename = "template2")]
    BilingualDistributor,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown template '{0}' (expected template1 or template2)")]
pub struct ParseTemplateVariantError(String);

impl TemplateVariant {
    pub fn all() -> &'static [TemplateVariant] {
        &[
            TemplateVariant::DealerStyle,
            TemplateVariant::BilingualDistributor,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DealerStyle => "template1",
            Self::BilingualDistributor => "template2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DealerStyle => "Template Belotti Macchine Agricole",
            Self::BilingualDistributor => "Template Avant Tecno Italia",
        }
    }
}

impl FromStr for TemplateVariant {
    type Err = ParseTemplateVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "template1" => Ok(Self::DealerStyle),
            "template2" => Ok(Self::BilingualDistributor),
            other => Err(ParseTemplateVariantError(other.to_string())),
        }
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
