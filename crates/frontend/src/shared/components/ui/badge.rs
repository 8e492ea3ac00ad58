use contracts::enums::Severity;
use contracts::shared::labels::Labels;
use leptos::prelude::*;

use crate::shared::model_utils::labels_as_strings;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    children: Children,
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

pub fn severity_variant(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "primary",
        Severity::None => "neutral",
    }
}

/// Severity with its color; an unknown severity renders as "Unknown"
#[component]
pub fn SeverityBadge(
    #[prop(into)] severity: Option<Severity>,
    /// Score shown next to the name, e.g. `High (7.5)`
    #[prop(optional_no_strip, into)]
    score: Option<f64>,
) -> impl IntoView {
    let variant = severity.map(severity_variant).unwrap_or("neutral");
    let name = severity.map(|s| s.display_name()).unwrap_or("Unknown");
    let text = match score {
        Some(score) => format!("{} ({:.1})", name, score),
        None => name.to_string(),
    };
    view! {
        <Badge variant=variant class="badge--severity">{text}</Badge>
    }
}

/// One badge per `key=value` label
#[component]
pub fn LabelBadges(labels: Labels) -> impl IntoView {
    labels_as_strings(&labels)
        .into_iter()
        .map(|label| view! { <Badge class="badge--label">{label}</Badge> })
        .collect_view()
}
