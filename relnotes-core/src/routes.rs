//! Route table handed to the rendering layer.

use crate::{config::Config, loader::LoadedContent};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    ReleaseList,
    Release,
    HighlightList,
    Highlight,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteKind::ReleaseList => "release_list",
            RouteKind::Release => "release",
            RouteKind::HighlightList => "highlight_list",
            RouteKind::Highlight => "highlight",
        };
        f.write_str(name)
    }
}

/// One page the renderer must produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub kind: RouteKind,
    /// Source tokens of the documents whose content the page embeds
    pub sources: Vec<String>,
}

/// Build every route for the loaded collections.
///
/// The highlights list page is only registered when enabled in the config.
pub fn build_routes(config: &Config, content: &LoadedContent) -> Vec<Route> {
    let mut routes = Vec::with_capacity(content.releases.len() + content.highlights.len() + 2);

    routes.push(Route {
        path: config.release_route(),
        kind: RouteKind::ReleaseList,
        sources: content
            .releases
            .iter()
            .map(|r| r.document.source.clone())
            .collect(),
    });

    routes.extend(content.releases.iter().map(|r| Route {
        path: r.document.permalink.clone(),
        kind: RouteKind::Release,
        sources: vec![r.document.source.clone()],
    }));

    if config.releases.highlights.list_page {
        routes.push(Route {
            path: config.highlight_route(),
            kind: RouteKind::HighlightList,
            sources: content
                .highlights
                .iter()
                .map(|h| h.document.source.clone())
                .collect(),
        });
    }

    routes.extend(content.highlights.iter().map(|h| Route {
        path: h.document.permalink.clone(),
        kind: RouteKind::Highlight,
        sources: vec![h.document.source.clone()],
    }));

    routes
}
