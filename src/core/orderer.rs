//! Orders detected configuration units into a deployment plan

use super::precedence::{self, Phase};
use crate::types::ConfigUnit;
use std::collections::BTreeSet;

/// Detected units in deployment order.
///
/// `units` is the precedence table restricted to what was detected.
/// Detected units the table does not know are kept aside in `unmapped`;
/// they have no safe position and are never deployed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentPlan {
    pub units: Vec<ConfigUnit>,
    pub unmapped: Vec<ConfigUnit>,
}

/// One playbook step of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanStep<'a> {
    pub unit: &'a ConfigUnit,
    pub phase: Phase,
    pub description: &'a str,
}

impl DeploymentPlan {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(ConfigUnit::as_str).collect()
    }

    pub fn steps(&self) -> impl Iterator<Item = PlanStep<'_>> {
        self.units.iter().filter_map(|unit| {
            precedence::phase_of(unit.as_str()).map(|phase| PlanStep {
                unit,
                phase,
                description: precedence::describe(unit),
            })
        })
    }
}

/// Arrange `detected` in precedence-table order
pub fn order(detected: &BTreeSet<ConfigUnit>) -> DeploymentPlan {
    let units: Vec<ConfigUnit> = precedence::entries()
        .filter(|(_, name)| detected.contains(*name))
        .map(|(_, name)| ConfigUnit::new(name))
        .collect();

    let unmapped: Vec<ConfigUnit> = detected
        .iter()
        .filter(|unit| !precedence::is_known(unit.as_str()))
        .cloned()
        .collect();

    for unit in &unmapped {
        tracing::warn!(
            unit = unit.as_str(),
            "unit has no position in the precedence table, leaving it out of the plan"
        );
    }

    DeploymentPlan { units, unmapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn units(names: &[&str]) -> BTreeSet<ConfigUnit> {
        names.iter().map(|name| ConfigUnit::new(*name)).collect()
    }

    #[test]
    fn test_order_follows_table_not_detection() {
        let plan = order(&units(&["aci_tenant", "aci_vlan_pool", "aci_epg"]));

        assert_eq!(
            plan.unit_names(),
            vec!["aci_vlan_pool", "aci_tenant", "aci_epg"]
        );
        assert!(plan.unmapped.is_empty());
    }

    #[test]
    fn test_order_single_unit() {
        let plan = order(&units(&["aci_vlan_pool"]));
        assert_eq!(plan.unit_names(), vec!["aci_vlan_pool"]);
    }

    #[test]
    fn test_order_drops_unmapped() {
        let plan = order(&units(&["aci_unmapped_thing", "aci_tenant"]));

        assert_eq!(plan.unit_names(), vec!["aci_tenant"]);
        assert_eq!(plan.unmapped, vec![ConfigUnit::new("aci_unmapped_thing")]);
    }

    #[test]
    fn test_order_empty() {
        let plan = order(&BTreeSet::new());
        assert!(plan.is_empty());
        assert!(plan.unmapped.is_empty());
    }

    #[test]
    fn test_order_is_idempotent() {
        let detected = units(&[
            "aci_l3out",
            "aci_contract",
            "aci_bd",
            "aci_domain",
            "aci_match_rule",
            "aci_not_a_module",
        ]);

        let first = order(&detected);
        let replayed: BTreeSet<ConfigUnit> = first.units.iter().cloned().collect();
        let again = order(&replayed);

        assert_eq!(first.units, again.units);
        assert!(again.unmapped.is_empty());
    }

    #[test]
    fn test_order_is_subsequence_of_table() {
        let all: Vec<&str> = precedence::entries().map(|(_, name)| name).collect();
        // every other entry, inserted back to front
        let detected: BTreeSet<ConfigUnit> = all
            .iter()
            .rev()
            .step_by(2)
            .map(|name| ConfigUnit::new(*name))
            .collect();

        let plan = order(&detected);

        assert_eq!(plan.len(), detected.len());
        let mut cursor = all.iter();
        for unit in &plan.units {
            assert!(
                cursor.any(|name| *name == unit.as_str()),
                "{} out of table order",
                unit
            );
            assert!(detected.contains(unit));
        }
    }

    #[test]
    fn test_order_full_table() {
        let detected: BTreeSet<ConfigUnit> = precedence::entries()
            .map(|(_, name)| ConfigUnit::new(name))
            .collect();

        let plan = order(&detected);
        let expected: Vec<&str> = precedence::entries().map(|(_, name)| name).collect();

        assert_eq!(plan.unit_names(), expected);
    }

    #[test]
    fn test_steps_carry_phase_and_description() {
        let plan = order(&units(&["aci_epg", "aci_vlan_pool", "aci_match_rule"]));
        let steps: Vec<PlanStep<'_>> = plan.steps().collect();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].phase, Phase::PoolsAndDomains);
        assert_eq!(steps[0].description, "VLAN Pools");
        assert_eq!(steps[1].phase, Phase::Tenant);
        assert_eq!(steps[1].description, "Endpoint Groups");
        assert_eq!(steps[2].phase, Phase::RouteControl);
        assert_eq!(steps[2].description, "match_rule");
    }
}
