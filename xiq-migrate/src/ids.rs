use std::collections::HashMap;

use uuid::Uuid;

/// Identifiers handed out during one conversion run.
///
/// Create one per run and drop it with the run; nothing here outlives the
/// conversion that owns it.
#[derive(Debug, Default)]
pub struct IdAllocator {
    topologies: HashMap<u16, String>,
    policies: HashMap<String, String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh random (v4) UUID string.
    pub fn fresh(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Allocate the topology id for `vlan_id`.
    ///
    /// Returns `None` if the VLAN already has a topology in this run.
    pub fn assign_topology(&mut self, vlan_id: u16) -> Option<String> {
        if self.topologies.contains_key(&vlan_id) {
            return None;
        }
        let id = self.fresh();
        self.topologies.insert(vlan_id, id.clone());
        Some(id)
    }

    pub fn topology_for(&self, vlan_id: u16) -> Option<&str> {
        self.topologies.get(&vlan_id).map(String::as_str)
    }

    /// Allocate (or return the existing) id for a named policy.
    pub fn policy_id(&mut self, name: &str) -> String {
        if let Some(id) = self.policies.get(name) {
            return id.clone();
        }
        let id = self.fresh();
        self.policies.insert(name.to_string(), id.clone());
        id
    }

    pub fn lookup_policy(&self, name: &str) -> Option<&str> {
        self.policies.get(name).map(String::as_str)
    }
}
