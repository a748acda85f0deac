//! JSON format report generation

use serde_json::json;

use super::LoopReportGenerator;
use crate::cycles::CycleEnumerator;
use crate::error::GyreError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl LoopReportGenerator for JsonReportGenerator {
    fn generate_report(&self, enumerator: &CycleEnumerator) -> Result<String, GyreError> {
        let report = json!({
            "has_loops": enumerator.has_loops(),
            "loop_count": enumerator.loop_count(),
            "loops": enumerator.loops(),
        });

        serde_json::to_string_pretty(&report).map_err(GyreError::Json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::edge_filter::AcceptAll;
    use crate::graph::{DirectedGraph, NodeId};

    fn enumerator_with_triangle() -> CycleEnumerator {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        for id in 0..3 {
            graph.add_node(NodeId::new(id), ()).unwrap();
        }
        for (source, sink) in [(0, 1), (1, 2), (2, 0)] {
            graph
                .upsert_edge(NodeId::new(source), NodeId::new(sink), ())
                .unwrap();
        }

        let mut enumerator = CycleEnumerator::new();
        enumerator.enumerate(&graph, &mut AcceptAll).unwrap();
        enumerator
    }

    #[test]
    fn test_json_report_no_loops() {
        let enumerator = CycleEnumerator::new();
        let generator = JsonReportGenerator::new();

        let report = generator.generate_report(&enumerator).unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_loops"], false);
        assert_eq!(json["loop_count"], 0);
        assert_eq!(json["loops"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_json_report_with_loops() {
        let enumerator = enumerator_with_triangle();
        let generator = JsonReportGenerator::new();

        let report = generator.generate_report(&enumerator).unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_loops"], true);
        assert_eq!(json["loop_count"], 1);
        assert_eq!(json["loops"][0]["vertices"], serde_json::json!([0, 1, 2]));
    }

    #[test]
    fn test_json_report_pretty_formatting() {
        let enumerator = CycleEnumerator::new();
        let generator = JsonReportGenerator::new();

        let report = generator.generate_report(&enumerator).unwrap();

        // Pretty formatted JSON should have newlines and indentation
        assert!(report.contains('\n'));
        assert!(report.contains("  "));
    }
}
