use tracing::warn;

use crate::pagination::Pager;

/// Value of the `data-app-name` attribute the host gives our container.
pub const APP_NAME: &str = "sRNA_phasing_app";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Interactive,
    MainResults,
    ProvenanceInfo,
}

impl Region {
    pub const ALL: [Region; 3] = [
        Region::Interactive,
        Region::MainResults,
        Region::ProvenanceInfo,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            Region::Interactive => "interactive",
            Region::MainResults => "main_results",
            Region::ProvenanceInfo => "provenance-info",
        }
    }

    fn index(self) -> usize {
        match self {
            Region::Interactive => 0,
            Region::MainResults => 1,
            Region::ProvenanceInfo => 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RegionContent {
    classes: Vec<String>,
    inner_html: String,
}

#[derive(Debug, Clone)]
struct Skeleton {
    title_html: String,
    regions: [RegionContent; 3],
}

/// The widget's slice of the host page.
///
/// Holds whatever the host put in the container until the skeleton is
/// rendered; after that, the title and three regions. Region mutations
/// before the skeleton exists are dropped, the same way a selector that
/// matches nothing would be.
#[derive(Debug, Clone)]
pub struct AppContext {
    app_name: String,
    placeholder_html: String,
    skeleton: Option<Skeleton>,
    pager: Pager,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            placeholder_html: String::new(),
            skeleton: None,
            pager: Pager::default(),
        }
    }

    pub fn with_placeholder(mut self, html: impl Into<String>) -> Self {
        self.placeholder_html = html.into();
        self
    }

    pub fn with_pager(mut self, pager: Pager) -> Self {
        self.pager = pager;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn has_skeleton(&self) -> bool {
        self.skeleton.is_some()
    }

    /// Replaces the whole container content with the title and three empty
    /// regions.
    pub fn render_skeleton(&mut self, title_html: impl Into<String>) {
        self.skeleton = Some(Skeleton {
            title_html: title_html.into(),
            regions: Region::ALL.map(|region| RegionContent {
                classes: vec![region.class_name().to_string()],
                inner_html: String::new(),
            }),
        });
    }

    fn region_mut(&mut self, region: Region) -> Option<&mut RegionContent> {
        match self.skeleton.as_mut() {
            Some(skeleton) => Some(&mut skeleton.regions[region.index()]),
            None => {
                warn!(
                    region = region.class_name(),
                    "region mutated before skeleton was rendered"
                );
                None
            }
        }
    }

    pub fn set_html(&mut self, region: Region, html: impl Into<String>) {
        if let Some(content) = self.region_mut(region) {
            content.inner_html = html.into();
        }
    }

    pub fn append_html(&mut self, region: Region, html: &str) {
        if let Some(content) = self.region_mut(region) {
            content.inner_html.push_str(html);
        }
    }

    pub fn add_class(&mut self, region: Region, class: &str) {
        if let Some(content) = self.region_mut(region) {
            if !content.classes.iter().any(|c| c == class) {
                content.classes.push(class.to_string());
            }
        }
    }

    pub fn region_html(&self, region: Region) -> Option<&str> {
        self.skeleton
            .as_ref()
            .map(|skeleton| skeleton.regions[region.index()].inner_html.as_str())
    }

    pub fn region_classes(&self, region: Region) -> Vec<&str> {
        self.skeleton
            .as_ref()
            .map(|skeleton| {
                skeleton.regions[region.index()]
                    .classes
                    .iter()
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn inner_html(&self) -> String {
        let Some(skeleton) = &self.skeleton else {
            return self.placeholder_html.clone();
        };

        let region = |region: Region| {
            let content = &skeleton.regions[region.index()];
            format!(
                r#"<div class="{}">{}</div>"#,
                content.classes.join(" "),
                content.inner_html
            )
        };

        format!(
            "<h2>{}</h2>{}{}<hr>{}<br>",
            skeleton.title_html,
            region(Region::Interactive),
            region(Region::MainResults),
            region(Region::ProvenanceInfo),
        )
    }

    /// Full container markup, as the host would embed it.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div data-app-name="{}">{}</div>"#,
            self.app_name,
            self.inner_html()
        )
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
