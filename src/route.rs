//! Route address list and the multi-waypoint maps URL.
//!
//! The visit order is the routing hint — no dedup, no reordering. Actual
//! route optimization is the mapping provider's job.

use crate::pipeline::types::VisitRecord;

const MAPS_DIR_URL: &str = "https://www.google.com/maps/dir";

/// `[depot] + [every visit address, in order] + [depot]`.
///
/// Zero visits with an address still yields the two-element depot round
/// trip — a degenerate but valid route request.
pub fn route_addresses(depot: &str, visits: &[VisitRecord]) -> Vec<String> {
    let mut addresses = Vec::with_capacity(visits.len() + 2);
    addresses.push(depot.to_string());
    addresses.extend(
        visits
            .iter()
            .filter_map(|v| v.address.as_deref())
            .filter(|a| !a.is_empty())
            .map(String::from),
    );
    addresses.push(depot.to_string());
    addresses
}

/// Google Maps directions URL over the waypoint list, spaces folded to `+`.
pub fn maps_url(addresses: &[String]) -> String {
    let waypoints: Vec<String> = addresses.iter().map(|a| a.replace(' ', "+")).collect();
    format!("{MAPS_DIR_URL}/{}", waypoints.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::UrgencyTier;

    const DEPOT: &str = "Królowej Elżbiety 1A, Świebodzice";

    fn make_visit(address: Option<&str>) -> VisitRecord {
        VisitRecord {
            start_time: None,
            summary: "Naprawa".into(),
            address: address.map(String::from),
            phone: None,
            problem: None,
            tier: UrgencyTier::Standard,
        }
    }

    #[test]
    fn depot_brackets_the_route() {
        let visits = vec![make_visit(Some("Rynek 1")), make_visit(Some("Długa 5"))];
        let addresses = route_addresses(DEPOT, &visits);
        assert_eq!(addresses.len(), 4);
        assert_eq!(addresses.first().unwrap(), DEPOT);
        assert_eq!(addresses.last().unwrap(), DEPOT);
        assert_eq!(addresses[1], "Rynek 1");
        assert_eq!(addresses[2], "Długa 5");
    }

    #[test]
    fn visits_without_address_are_skipped() {
        let visits = vec![
            make_visit(Some("Rynek 1")),
            make_visit(None),
            make_visit(Some("Długa 5")),
        ];
        let addresses = route_addresses(DEPOT, &visits);
        assert_eq!(addresses.len(), 4);
        assert_eq!(addresses[1], "Rynek 1");
        assert_eq!(addresses[2], "Długa 5");
    }

    #[test]
    fn no_addresses_yields_degenerate_round_trip() {
        let addresses = route_addresses(DEPOT, &[make_visit(None)]);
        assert_eq!(addresses, vec![DEPOT.to_string(), DEPOT.to_string()]);

        let empty = route_addresses(DEPOT, &[]);
        assert_eq!(empty, vec![DEPOT.to_string(), DEPOT.to_string()]);
    }

    #[test]
    fn length_is_addressed_visits_plus_two() {
        let visits = vec![
            make_visit(Some("Rynek 1")),
            make_visit(None),
            make_visit(Some("Długa 5")),
            make_visit(Some("Krótka 2")),
        ];
        let addressed = visits.iter().filter(|v| v.address.is_some()).count();
        assert_eq!(route_addresses(DEPOT, &visits).len(), addressed + 2);
    }

    #[test]
    fn maps_url_joins_waypoints_with_plus_encoding() {
        let addresses = vec!["Rynek 1, Miasto".to_string(), "Długa 5".to_string()];
        assert_eq!(
            maps_url(&addresses),
            "https://www.google.com/maps/dir/Rynek+1,+Miasto/Długa+5"
        );
    }
}
