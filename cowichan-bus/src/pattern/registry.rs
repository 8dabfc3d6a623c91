//! Registry of two-way routes and their canonical patterns.
//!
//! Routes listed here are split into two synthetic trips by aligning every
//! observed trip against both patterns. Routes not listed take the generic
//! path and keep the feed's own direction ids.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::{DirectionTag, RouteId};
use crate::split::SplitError;

use super::{PatternBuilder, RouteSpec};

/// Immutable table of route specs, keyed by route id.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    routes: HashMap<RouteId, RouteSpec>,
}

impl PatternRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route spec. A route may only be registered once.
    pub fn insert(&mut self, spec: RouteSpec) -> Result<(), SplitError> {
        let route = spec.route_id().clone();
        if self.routes.contains_key(&route) {
            return Err(SplitError::ConfigurationGap {
                route,
                reason: "route registered twice".to_string(),
            });
        }
        self.routes.insert(route, spec);
        Ok(())
    }

    /// Get the spec for a route, or `None` if the route is not split.
    pub fn lookup(&self, route: &RouteId) -> Option<&RouteSpec> {
        self.routes.get(route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

static COWICHAN_VALLEY: LazyLock<Result<PatternRegistry, SplitError>> =
    LazyLock::new(build_cowichan_valley);

/// The process-wide Cowichan Valley registry.
///
/// Built on first use and shared read-only afterwards. A malformed table is
/// reported on every call.
pub fn cowichan_valley() -> Result<&'static PatternRegistry, SplitError> {
    COWICHAN_VALLEY.as_ref().map_err(Clone::clone)
}

fn build_cowichan_valley() -> Result<PatternRegistry, SplitError> {
    let specs = [
        RouteSpec::builder("5")
            .direction(
                DirectionTag::NORTH,
                "Duncan",
                PatternBuilder::new()
                    .required("106205") // Polkey at Mearns (EB)
                    .required("106225")
                    .required("104033"), // Central at Cowichan (NB)
            )
            .direction(
                DirectionTag::SOUTH,
                "Eagle Hts",
                PatternBuilder::new()
                    .required("104033")
                    .required("136113")
                    .required("106205"),
            )
            .build()?,
        RouteSpec::builder("7")
            .direction(
                DirectionTag::EAST,
                "Duncan",
                PatternBuilder::new()
                    .required("136191") // South Shore 10 block (WB)
                    .alternate(&["136457"]) // Cowichan Lake at Greendale (EB)
                    .optional("136397") // Cowichan Valley at Skutz Falls (EB)
                    .optional("136034") // Canada at Station (SB)
                    .optional("136202") // Cowichan Lake at Lake Park (EB)
                    .optional("136110") // Government at Station (EB)
                    .alternate(&["104033"]),
            )
            .direction(
                DirectionTag::WEST,
                "Cowichan Lk",
                PatternBuilder::new()
                    .required("104033")
                    .alternate(&["106148"]) // Canada at Station (NB)
                    .optional("106131") // Beverly at Duncan St (EB)
                    .optional("106159") // Somenos at Cowichan Valley Hwy (NB)
                    .optional("136002") // Ingram at Jubilee (WB)
                    .optional("136188") // Cowichan Lake at Lake Park (WB)
                    .alternate(&["136189"]) // Cowichan Lake at Greendale (WB)
                    .optional("136190") // Cowichan Lake at Stanley (WB)
                    .looping("136191")
                    .optional("136195") // South Shore at Stone (SB)
                    .optional("136427") // Somenos at Cowichan (NB)
                    .looping("136191"),
            )
            .build()?,
        RouteSpec::builder("8")
            .direction(
                DirectionTag::NORTH,
                "Duncan",
                PatternBuilder::new()
                    .alternate(&["108060"]) // Huckleberry at Noowick (NB)
                    .alternate(&["104000"]) // Lodgepole at Frayne (NB)
                    .optional("108052") // Deloume at Lodge Pole Rd (EB)
                    .alternate(&["108090"]) // Deloume Rd at Barry (NB)
                    .looping("136295") // Mill Bay at Handy (SB)
                    .optional("108006") // Shawnigan Lake-Mill Bay at Trans Canada (WB)
                    .alternate(&["108162"])
                    .optional("108056")
                    .optional("104006")
                    .alternate(&["136280"])
                    .required("104033"),
            )
            .direction(
                DirectionTag::SOUTH,
                "Mill Bay",
                PatternBuilder::new()
                    .required("104033")
                    .required("136373") // Cowichan Bay at Telegraph (SB)
                    .alternate(&["108051"])
                    .optional("106201")
                    .optional("106202")
                    .alternate(&["108048"])
                    .optional("108038") // Kilmalu at Church Way (WB)
                    .looping("136295")
                    .alternate(&["136296"]) // Mill Bay at Bay (SB)
                    .optional("136300") // Mill Bay at Ferry (NB)
                    .alternate(&["108060"]),
            )
            .build()?,
        RouteSpec::builder("9")
            .direction(
                DirectionTag::NORTH,
                "Duncan",
                PatternBuilder::new()
                    .required("108060")
                    .optional("108090")
                    .looping("136295")
                    .optional("136302")
                    .alternate(&["108019"])
                    .optional("106201")
                    .optional("106202")
                    .alternate(&["108018"])
                    .optional("106237")
                    .shared("108089")
                    .optional("136234")
                    .required("104033"),
            )
            .direction(
                DirectionTag::SOUTH,
                "Mill Bay",
                PatternBuilder::new()
                    .required("104033")
                    .alternate(&["104021"])
                    .optional("104020")
                    .shared("108089")
                    .alternate(&["136248"])
                    .optional("108059")
                    .looping("136295")
                    .optional("136296")
                    .required("108060"),
            )
            .build()?,
        RouteSpec::builder("20")
            .direction(
                DirectionTag::EAST,
                "Cowichan Lk",
                PatternBuilder::new()
                    .required("108045") // Youbou Rd 10700 Block (NB)
                    .required("136193")
                    .required("108088"), // 20 Block South Shore Rd (WB)
            )
            .direction(
                DirectionTag::WEST,
                "Youbou",
                PatternBuilder::new()
                    .required("108088")
                    .required("108172")
                    .required("108045"),
            )
            .build()?,
        RouteSpec::builder("21")
            .direction(
                DirectionTag::EAST,
                "Cowichan Lk",
                PatternBuilder::new()
                    .required("108168") // South Shore at Park Ave (WB)
                    .required("136200")
                    .required("108088"),
            )
            .direction(
                DirectionTag::WEST,
                "Honeymoon Bay",
                PatternBuilder::new()
                    .required("108088")
                    .required("136196")
                    .required("108168"),
            )
            .build()?,
        RouteSpec::builder("31")
            .direction(
                DirectionTag::EAST,
                "Ladysmith",
                PatternBuilder::new()
                    .required("106078") // Birchwood at Maplewood (EB)
                    .required("106063")
                    .required("106050"), // 1st Ave at Symonds St (SB)
            )
            .direction(
                DirectionTag::WEST,
                "Alderwood",
                PatternBuilder::new()
                    .required("106050")
                    .required("106062")
                    .required("106078"),
            )
            .build()?,
        RouteSpec::builder("34")
            .direction(
                DirectionTag::NORTH,
                "Ladysmith",
                PatternBuilder::new()
                    .required("136142") // Pine at Lang (WB)
                    .required("106095")
                    .required("106050"),
            )
            .direction(
                DirectionTag::SOUTH,
                "Chemainus",
                PatternBuilder::new()
                    .required("106050")
                    .required("106098")
                    .required("136142"),
            )
            .build()?,
    ];

    let mut registry = PatternRegistry::new();
    for spec in specs {
        registry.insert(spec)?;
    }
    Ok(registry)
}
