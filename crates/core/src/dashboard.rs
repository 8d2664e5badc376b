//! Dashboard shell navigation
//!
//! Sections and tabs come from a static tree; the shell only decides which
//! panel is selected and which tabs are visible.

use serde::Serialize;

use crate::{Error, Result};

/// Optional features that hide tabs when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    GlossaryImport,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TabConfig {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    pub feature: Option<Feature>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionConfig {
    pub id: &'static str,
    pub label: &'static str,
    pub tabs: &'static [TabConfig],
}

const fn tab(id: &'static str, label: &'static str) -> TabConfig {
    TabConfig {
        id,
        label,
        feature: None,
    }
}

pub static DASHBOARD_SECTIONS: &[SectionConfig] = &[
    SectionConfig {
        id: "glossaries",
        label: "Glossaries",
        tabs: &[
            tab("glossaries", "All glossaries"),
            tab("terms", "Terms"),
            TabConfig {
                id: "import",
                label: "Import",
                feature: Some(Feature::GlossaryImport),
            },
        ],
    },
    SectionConfig {
        id: "team",
        label: "Team",
        tabs: &[tab("members", "Members"), tab("invitations", "Invitations")],
    },
    SectionConfig {
        id: "billing",
        label: "Billing",
        tabs: &[tab("licenses", "Extension licenses"), tab("portal", "Customer portal")],
    },
    SectionConfig {
        id: "settings",
        label: "Settings",
        tabs: &[tab("organization", "Organization"), tab("profile", "Profile")],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSelection {
    pub section: &'static str,
    pub tab: &'static str,
}

impl DashboardSelection {
    pub fn path(&self) -> String {
        format!("/dashboard/{}/{}", self.section, self.tab)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSnapshot {
    pub id: &'static str,
    pub label: &'static str,
    pub tabs: Vec<TabConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub sections: Vec<SectionSnapshot>,
    pub default_selection: DashboardSelection,
}

#[derive(Debug, Clone)]
pub struct DashboardShell {
    sections: &'static [SectionConfig],
    enabled_features: Vec<Feature>,
}

impl Default for DashboardShell {
    fn default() -> Self {
        Self::new(DASHBOARD_SECTIONS)
    }
}

impl DashboardShell {
    /// `sections` must contain at least one section with an ungated tab.
    pub fn new(sections: &'static [SectionConfig]) -> Self {
        Self {
            sections,
            enabled_features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: Feature, enabled: bool) -> Self {
        self.enabled_features.retain(|item| *item != feature);
        if enabled {
            self.enabled_features.push(feature);
        }
        self
    }

    fn tab_visible(&self, tab: &TabConfig) -> bool {
        tab.feature
            .map_or(true, |feature| self.enabled_features.contains(&feature))
    }

    fn visible_tabs<'a>(&'a self, section: &'a SectionConfig) -> impl Iterator<Item = &'a TabConfig> + 'a {
        section.tabs.iter().filter(|tab| self.tab_visible(tab))
    }

    pub fn sections(&self) -> impl Iterator<Item = &'static SectionConfig> + '_ {
        let sections: &'static [SectionConfig] = self.sections;
        sections
            .iter()
            .filter(|section| self.visible_tabs(section).next().is_some())
    }

    fn section(&self, id: &str) -> Result<&'static SectionConfig> {
        self.sections()
            .find(|section| section.id == id)
            .ok_or_else(|| Error::NotFound(format!("Dashboard section '{}'", id)))
    }

    /// Select a section and tab by id. Hidden tabs cannot be selected.
    pub fn select(&self, section_id: &str, tab_id: &str) -> Result<DashboardSelection> {
        let section = self.section(section_id)?;
        let tab = self
            .visible_tabs(section)
            .find(|tab| tab.id == tab_id)
            .ok_or_else(|| {
                Error::NotFound(format!("Tab '{}' in section '{}'", tab_id, section_id))
            })?;
        Ok(DashboardSelection {
            section: section.id,
            tab: tab.id,
        })
    }

    /// Select a section, landing on its first visible tab.
    pub fn select_section(&self, section_id: &str) -> Result<DashboardSelection> {
        let section = self.section(section_id)?;
        let tab = self
            .visible_tabs(section)
            .next()
            .ok_or_else(|| Error::NotFound(format!("Dashboard section '{}'", section_id)))?;
        Ok(DashboardSelection {
            section: section.id,
            tab: tab.id,
        })
    }

    pub fn default_selection(&self) -> DashboardSelection {
        self.sections()
            .find_map(|section| {
                self.visible_tabs(section).next().map(|tab| DashboardSelection {
                    section: section.id,
                    tab: tab.id,
                })
            })
            .unwrap_or(DashboardSelection {
                section: "glossaries",
                tab: "glossaries",
            })
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            sections: self
                .sections()
                .map(|section| SectionSnapshot {
                    id: section.id,
                    label: section.label,
                    tabs: self.visible_tabs(section).copied().collect(),
                })
                .collect(),
            default_selection: self.default_selection(),
        }
    }
}
