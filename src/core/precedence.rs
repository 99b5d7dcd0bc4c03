//! Static deployment precedence for ACI configuration units
//!
//! Units form a dependency DAG known ahead of time (a VLAN pool before the
//! domain using it, a tenant before its VRFs, contracts before the EPGs that
//! consume them). [`PRECEDENCE`] is one total order consistent with every
//! edge, grouped into phases. Entries are unique and their order is fixed.

use crate::types::ConfigUnit;
use std::fmt;

/// Deployment phase of a configuration unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    PoolsAndDomains,
    InterfacePolicies,
    SwitchProfiles,
    Tenant,
    RoutingPolicy,
    Contracts,
    L3Out,
    RouteControl,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::PoolsAndDomains => "Pools and domains",
            Phase::InterfacePolicies => "Interface policies",
            Phase::SwitchProfiles => "Switch and interface profiles",
            Phase::Tenant => "Tenant",
            Phase::RoutingPolicy => "BGP policies",
            Phase::Contracts => "Contracts and filters",
            Phase::L3Out => "L3Out",
            Phase::RouteControl => "Route control",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const PRECEDENCE: &[(Phase, &[&str])] = &[
    (
        Phase::PoolsAndDomains,
        &[
            "aci_vlan_pool",
            "aci_vlan_pool_encap_block",
            "aci_domain",
            "aci_domain_to_vlan_pool",
            "aci_aep",
            "aci_aep_to_domain",
            "aci_switch_policy_vpc_protection_gr",
        ],
    ),
    (
        Phase::InterfacePolicies,
        &[
            "aci_interface_policy_cdp",
            "aci_interface_policy_link_level",
            "aci_interface_policy_lldp",
            "aci_interface_policy_mcp",
            "aci_interface_policy_port_channel",
            "aci_interface_policy_spanning_tree",
            "aci_interface_config",
            "aci_interface_policy_leaf_policy_gr",
        ],
    ),
    (
        // after the interface policies they reference
        Phase::SwitchProfiles,
        &[
            "aci_switch_policy_leaf_profile",
            "aci_interface_policy_leaf_profile",
            "aci_switch_leaf_selector",
            "aci_int_sel_to_switch_policy_leaf",
            "aci_access_port_to_int_policy_leaf",
        ],
    ),
    (
        Phase::Tenant,
        &[
            "aci_tenant",
            "aci_vrf",
            "aci_bd",
            "aci_bd_subnet",
            "aci_bd_to_l3out",
            "aci_ap",
            "aci_epg",
            "aci_aep_to_epg",
            "aci_epg_to_domain",
        ],
    ),
    (
        // before L3Out
        Phase::RoutingPolicy,
        &[
            "aci_bgp_timers_policy",
            "aci_bgp_best_path_policy",
            "aci_bgp_address_family_context_policy",
        ],
    ),
    (
        Phase::Contracts,
        &[
            "aci_filter",
            "aci_contract",
            "aci_contract_subject",
            "aci_contract_subject_to_filter",
            "aci_epg_to_contract",
        ],
    ),
    (
        Phase::L3Out,
        &[
            "aci_l3out",
            "aci_l3out_logical_node_profile",
            "aci_l3out_logical_node",
            "aci_l3out_logical_interface_profile",
            "aci_l3out_interface",
            "aci_l3out_bgp_protocol_profile",
            "aci_l3out_bgp_peer",
            "aci_l3out_floating_svi",
            "aci_l3out_floating_svi_path",
            "aci_l3out_bgp_peer_floating",
            "aci_l3out_extepg",
            "aci_l3out_extsubnet",
            "aci_l3out_extepg_to_contract",
            "aci_l3out_logical_interface_vpc_member",
            "aci_l3out_floating_svi_secondary_ip",
            "aci_l3out_floating_svi_path_secondary_ip",
        ],
    ),
    (
        Phase::RouteControl,
        &[
            "aci_match_rule",
            "aci_match_route_destination",
            "aci_route_control_profile",
            "aci_route_control_context",
        ],
    ),
];

/// Human-readable labels used in playbook task names
const DESCRIPTIONS: &[(&str, &str)] = &[
    ("aci_vlan_pool", "VLAN Pools"),
    ("aci_vlan_pool_encap_block", "VLAN Encap Blocks"),
    ("aci_domain", "Physical Domains"),
    ("aci_domain_to_vlan_pool", "Domain to VLAN Pool associations"),
    ("aci_aep", "AEPs (Attachable Entity Profiles)"),
    ("aci_aep_to_domain", "AEP to Domain associations"),
    ("aci_switch_policy_vpc_protection_gr", "VPC Protection Groups"),
    ("aci_switch_policy_leaf_profile", "Switch Policy Leaf Profiles"),
    ("aci_interface_policy_leaf_profile", "Interface Policy Leaf Profiles"),
    ("aci_switch_leaf_selector", "Switch Leaf Selectors"),
    (
        "aci_int_sel_to_switch_policy_leaf",
        "Interface to Switch Policy associations",
    ),
    (
        "aci_access_port_to_int_policy_leaf",
        "Access Port to Interface Policy bindings",
    ),
    ("aci_interface_policy_cdp", "CDP policies"),
    ("aci_interface_policy_link_level", "Link Level policies"),
    ("aci_interface_policy_lldp", "LLDP policies"),
    ("aci_interface_policy_mcp", "MCP policies"),
    ("aci_interface_policy_port_channel", "Port Channel policies"),
    ("aci_interface_policy_spanning_tree", "Spanning Tree policies"),
    ("aci_interface_policy_leaf_policy_gr", "Leaf Policy Groups"),
    ("aci_interface_config", "Interface Configurations"),
    ("aci_tenant", "Tenants"),
    ("aci_vrf", "VRFs"),
    ("aci_bd", "Bridge Domains"),
    ("aci_bd_subnet", "BD Subnets"),
    ("aci_bd_to_l3out", "BD to L3Out associations"),
    ("aci_ap", "Application Profiles"),
    ("aci_epg", "Endpoint Groups"),
    ("aci_aep_to_epg", "AEP to EPG associations"),
    ("aci_epg_to_domain", "EPG to Domain associations"),
    ("aci_bgp_timers_policy", "BGP Timers Policies"),
    ("aci_bgp_best_path_policy", "BGP Best Path Policies"),
    (
        "aci_bgp_address_family_context_policy",
        "BGP Address Family Context Policies",
    ),
    ("aci_filter", "Filters"),
    ("aci_contract", "Contracts"),
    ("aci_contract_subject", "Contract Subjects"),
    ("aci_contract_subject_to_filter", "Subject to Filter associations"),
    ("aci_epg_to_contract", "EPG to Contract associations"),
    ("aci_l3out", "L3Outs"),
    ("aci_l3out_logical_node_profile", "L3Out Logical Node Profiles"),
    ("aci_l3out_logical_node", "L3Out Logical Nodes"),
    (
        "aci_l3out_logical_interface_profile",
        "L3Out Logical Interface Profiles",
    ),
    ("aci_l3out_interface", "L3Out Interfaces"),
    ("aci_l3out_bgp_protocol_profile", "L3Out BGP Protocol Profiles"),
    ("aci_l3out_bgp_peer", "L3Out BGP Peers"),
    ("aci_l3out_floating_svi", "L3Out Floating SVIs"),
    ("aci_l3out_floating_svi_path", "L3Out Floating SVI Paths"),
    ("aci_l3out_bgp_peer_floating", "L3Out Floating BGP Peers"),
    ("aci_l3out_extepg", "L3Out External EPGs"),
    ("aci_l3out_extsubnet", "L3Out External Subnets"),
    (
        "aci_l3out_extepg_to_contract",
        "L3Out External EPG to Contract associations",
    ),
    (
        "aci_l3out_logical_interface_vpc_member",
        "L3Out Logical Interface VPC Members",
    ),
    (
        "aci_l3out_floating_svi_secondary_ip",
        "L3Out Floating SVI Secondary IPs",
    ),
    (
        "aci_l3out_floating_svi_path_secondary_ip",
        "L3Out Floating SVI Path Secondary IPs",
    ),
];

/// Every unit of the table in deployment order, with its phase
pub fn entries() -> impl Iterator<Item = (Phase, &'static str)> {
    PRECEDENCE
        .iter()
        .flat_map(|(phase, units)| units.iter().map(move |unit| (*phase, *unit)))
}

pub fn phase_of(unit: &str) -> Option<Phase> {
    entries().find(|(_, name)| *name == unit).map(|(phase, _)| phase)
}

pub fn is_known(unit: &str) -> bool {
    phase_of(unit).is_some()
}

/// Label for a unit; falls back to the unit's task name
pub fn describe(unit: &ConfigUnit) -> &str {
    DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == unit.as_str())
        .map(|(_, label)| *label)
        .unwrap_or_else(|| unit.task_name())
}
