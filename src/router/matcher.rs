// ============================================================================
// MATCHER - flattens the route tree and resolves paths against it
// ============================================================================

use std::collections::HashMap;

use crate::router::routes::{Page, RouteDef, RouteMeta};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A leaf or inner route with its full pattern and ancestor chain
#[derive(Debug, Clone)]
struct FlatRoute {
    name: &'static str,
    page: Page,
    pattern: String,
    segments: Vec<Segment>,
    /// Metadata from the outermost ancestor down to this route
    chain: Vec<RouteMeta>,
}

/// A resolved navigation target
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub name: &'static str,
    pub page: Page,
    pub path: String,
    pub params: HashMap<String, String>,
    pub matched: Vec<RouteMeta>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Numeric `:id` parameter
    pub fn id(&self) -> Option<u64> {
        self.param("id")?.parse().ok()
    }

    /// Nearest title along the chain, child before ancestors
    pub fn title(&self) -> Option<&'static str> {
        self.matched.iter().rev().find_map(|meta| meta.title)
    }

    /// True when this route or any ancestor is guarded
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|meta| meta.requires_auth)
    }
}

pub struct RouteMatcher {
    routes: Vec<FlatRoute>,
}

impl RouteMatcher {
    pub fn new(defs: &[RouteDef]) -> Self {
        let mut routes = Vec::new();
        for def in defs {
            flatten(def, "", &[], &mut routes);
        }
        Self { routes }
    }

    /// First route, in declaration order, matching `path`
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = normalize(path);
        let parts: Vec<&str> = split(&path).collect();

        self.routes.iter().find_map(|route| {
            let params = match_segments(&route.segments, &parts)?;
            Some(RouteMatch {
                name: route.name,
                page: route.page,
                path: path.clone(),
                params,
                matched: route.chain.clone(),
            })
        })
    }

    /// Full pattern for a named route, e.g. `/admin/curtains`
    pub fn path_for(&self, name: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|route| route.name == name)
            .map(|route| route.pattern.as_str())
    }
}

fn flatten(def: &RouteDef, parent: &str, chain: &[RouteMeta], out: &mut Vec<FlatRoute>) {
    let pattern = join(parent, def.path);
    let mut chain = chain.to_vec();
    chain.push(def.meta);

    out.push(FlatRoute {
        name: def.name,
        page: def.page,
        segments: split(&pattern).map(parse_segment).collect(),
        pattern: pattern.clone(),
        chain: chain.clone(),
    });
    for child in &def.children {
        flatten(child, &pattern, &chain, out);
    }
}

fn join(parent: &str, path: &str) -> String {
    if path.starts_with('/') {
        return normalize(path);
    }
    normalize(&format!("{}/{}", parent.trim_end_matches('/'), path))
}

/// Drops query, fragment and trailing slash; always starts with `/`
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn parse_segment(raw: &str) -> Segment {
    match raw.strip_prefix(':') {
        Some(name) => Segment::Param(name.to_string()),
        None => Segment::Static(raw.to_string()),
    }
}

fn match_segments(segments: &[Segment], parts: &[&str]) -> Option<HashMap<String, String>> {
    if segments.len() != parts.len() {
        return None;
    }
    let mut params = HashMap::new();
    for (segment, part) in segments.iter().zip(parts) {
        match segment {
            Segment::Static(expected) if expected == part => {}
            Segment::Static(_) => return None,
            Segment::Param(name) => {
                params.insert(name.clone(), (*part).to_string());
            }
        }
    }
    Some(params)
}
