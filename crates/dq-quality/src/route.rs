use dq_model::{QualityConfig, RoutingDecision};

/// Threshold the quality score into a routing decision.
///
/// Total over the whole score range: below 60 aborts, 60 through 80
/// inclusive cleans, above 80 proceeds. This is the single most
/// safety-relevant branch in the system; both boundary values route
/// to CLEAN.
pub fn route(score: u8, config: &QualityConfig) -> RoutingDecision {
    if score < config.abort_below {
        RoutingDecision::Abort
    } else if score <= config.clean_through {
        RoutingDecision::Clean
    } else {
        RoutingDecision::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_route_to_clean() {
        let config = QualityConfig::default();
        assert_eq!(route(59, &config), RoutingDecision::Abort);
        assert_eq!(route(60, &config), RoutingDecision::Clean);
        assert_eq!(route(80, &config), RoutingDecision::Clean);
        assert_eq!(route(81, &config), RoutingDecision::Proceed);
    }

    #[test]
    fn extremes() {
        let config = QualityConfig::default();
        assert_eq!(route(0, &config), RoutingDecision::Abort);
        assert_eq!(route(100, &config), RoutingDecision::Proceed);
    }
}
