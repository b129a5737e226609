//! HTML page generation.
//!
//! Renders the dashboard as a single page of collapsible cards. Each card
//! header is a small GET form: it submits the card's id as `toggle` and the
//! currently open cards as `open`, so the server can apply the click and
//! render the next state.

use crate::dashboard::Dashboard;
use crate::models::{Insights, ViewId};
use crate::toggle::CardState;
use maud::{html, Markup, DOCTYPE};

/// Persian Blue background shared by the page and the cards.
const BACKGROUND: &str = "#003b5c";

/// Render the full page for the given card state.
pub fn render_dashboard(dashboard: &Dashboard, state: &CardState) -> String {
    generate_page(dashboard, state).into_string()
}

fn generate_page(dashboard: &Dashboard, state: &CardState) -> Markup {
    let page_style = format!("background-color: {}; color: #ffffff;", BACKGROUND);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (dashboard.page.title) }
                link rel="stylesheet" href=(dashboard.page.stylesheet);
            }
            body style=(page_style) {
                div class="container-fluid" style=(page_style) {
                    div class="row" {
                        div class="col-12" {
                            h1 class="text-center text-light" { (dashboard.page.title) }
                        }
                    }
                    div class="row" {
                        @for (view, chart) in dashboard.charts.iter() {
                            div class="col-12" {
                                (generate_card(view, chart, &dashboard.insights[view], state))
                            }
                        }
                    }
                    (generate_footer(dashboard))
                }
            }
        }
    }
}

/// One collapsible card: header button, embedded chart, insight lines.
fn generate_card(view: ViewId, chart: &str, insights: &Insights, state: &CardState) -> Markup {
    let id = view.id();
    let open = state.is_open(view);
    let collapse_class = if open { "collapse show" } else { "collapse" };

    html! {
        div class="card mb-4" style=(format!("background-color: {};", BACKGROUND)) {
            div class="card-header" {
                form method="get" action="/" class="m-0" {
                    @if let Some(open_ids) = state.encode() {
                        input type="hidden" name="open" value=(open_ids);
                    }
                    button id=(format!("{}-button", id))
                        class="btn btn-link"
                        type="submit"
                        name="toggle"
                        value=(id)
                        aria-expanded=(if open { "true" } else { "false" })
                        aria-controls=(format!("{}-collapse", id))
                        style="text-align: left; width: 100%;" {
                        (view.title())
                    }
                }
            }
            div id=(format!("{}-collapse", id)) class=(collapse_class) {
                div class="card-body" {
                    iframe class="mb-2" srcdoc=(chart) style="width: 100%; height: 400px;" {}
                    div id=(format!("{}-insights", id)) class="mb-2" style="color: white;" {
                        @for line in insights.lines() {
                            p { (line) }
                        }
                    }
                }
            }
        }
    }
}

fn generate_footer(dashboard: &Dashboard) -> Markup {
    html! {
        div class="row" {
            div class="col-12" {
                p class="text-center small" {
                    (format!(
                        "{} transactions from {} · loaded {}",
                        dashboard.transaction_count,
                        dashboard.source.display(),
                        dashboard.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
                    ))
                }
            }
        }
    }
}
