use std::collections::HashMap;

use crate::api::{FactorId, FactorNode};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: FactorId,
	pub title: String,
	pub score: Option<f64>,
	/// Ids of the nodes whose `affectsTo` names this node.
	pub affected_by: Vec<FactorId>,
}

impl GraphNode {
	/// Measured factors have no incoming relation; all others are inferred.
	pub fn is_measured(&self) -> bool {
		self.affected_by.is_empty()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	pub source: FactorId,
	pub target: FactorId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Project factors into nodes and one link per `(node, affected id)` pair.
	pub fn from_factors(factors: &[FactorNode]) -> Self {
		let links: Vec<GraphLink> = factors
			.iter()
			.flat_map(|f| {
				f.affects_to.iter().map(|&target| GraphLink {
					source: f.id,
					target,
				})
			})
			.collect();

		let mut affected_by: HashMap<FactorId, Vec<FactorId>> = HashMap::new();
		for link in &links {
			affected_by.entry(link.target).or_default().push(link.source);
		}

		let nodes = factors
			.iter()
			.map(|f| GraphNode {
				id: f.id,
				title: f.title.clone(),
				score: f.score,
				affected_by: affected_by.remove(&f.id).unwrap_or_default(),
			})
			.collect();

		Self { nodes, links }
	}

	/// Whether at least one factor carries a score.
	pub fn has_measurements(&self) -> bool {
		self.nodes.iter().any(|n| n.score.is_some())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn factor(id: FactorId, score: Option<f64>, affects_to: &[FactorId]) -> FactorNode {
		FactorNode {
			id,
			title: format!("F{}", id),
			score,
			affects_to: affects_to.to_vec(),
		}
	}

	#[test]
	fn two_node_example() {
		let data = GraphData::from_factors(&[factor(1, Some(0.8), &[2]), factor(2, None, &[])]);
		assert_eq!(data.links, vec![GraphLink { source: 1, target: 2 }]);
		assert!(data.nodes[0].is_measured());
		assert!(!data.nodes[1].is_measured());
		assert_eq!(data.nodes[1].affected_by, vec![1]);
	}

	#[test]
	fn link_count_matches_affects_pairs() {
		let factors = vec![
			factor(1, None, &[2, 3, 4]),
			factor(2, None, &[3]),
			factor(3, None, &[]),
			factor(4, None, &[1, 3]),
		];
		let pairs: usize = factors.iter().map(|f| f.affects_to.len()).sum();
		let data = GraphData::from_factors(&factors);
		assert_eq!(data.links.len(), pairs);
		assert_eq!(data.nodes[2].affected_by, vec![1, 2, 4]);
		assert_eq!(data.nodes[0].affected_by, vec![4]);
	}

	#[test]
	fn measurements_require_one_score() {
		let none = GraphData::from_factors(&[factor(1, None, &[]), factor(2, None, &[])]);
		assert!(!none.has_measurements());
		assert!(!GraphData::default().has_measurements());

		let some = GraphData::from_factors(&[factor(1, None, &[]), factor(2, Some(0.0), &[])]);
		assert!(some.has_measurements());
	}
}
