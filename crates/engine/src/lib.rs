// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later


//! Thread analysis engine implementation
//!
//! This crate provides the main analysis engine that orchestrates parsing,
//! graph building, and query operations for Thread code analysis.

use thread_core::*;
use petgraph::Graph;
use std::collections::HashMap;
use std::path::Path;

pub mod analyzer;
pub mod graph;
pub mod query;

pub use analyzer::*;
pub use graph::*;
pub use query::*;

/// Main analysis engine for Thread
pub struct ThreadEngine {
    graph: Graph<CodeNode, CodeEdge>,
    node_index: HashMap<ElementId, petgraph::graph::NodeIndex>,
}

impl ThreadEngine {
    /// Create a new Thread analysis engine
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Analyze a single file and integrate into the graph
    pub fn analyze_file(&mut self, file_path: &Path, content: &str) -> Result<AnalysisResult> {
        // TODO: Implement file analysis
        // 1. Parse with thread-parse
        // 2. Build graph nodes and edges
        // 3. Store in content store
        // 4. Return analysis result

        Ok(AnalysisResult {
            file_path: file_path.to_path_buf(),
            elements_found: 0,
            relationships_found: 0,
        })
    }

    /// Get the current graph statistics
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_nodes: self.graph.node_count(),
            total_edges: self.graph.edge_count(),
            total_files: 0, // TODO: Track files
        }
    }
}

impl Default for ThreadEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Graph node representing a code element
#[derive(Debug, Clone)]
pub struct CodeNode {
    pub element: CodeElement,
}

/// Graph edge representing a relationship between code elements
#[derive(Debug, Clone)]
pub struct CodeEdge {
    pub kind: EdgeKind,
    pub metadata: EdgeMetadata,
}

/// Types of relationships between code elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    Calls,
    Imports,
    Implements,
    Extends,
    Contains,
    References,
}

/// Metadata for graph edges
#[derive(Debug, Clone, Default)]
pub struct EdgeMetadata {
    pub line_number: Option<usize>,
    pub confidence: f32,
}

/// Result of analyzing a single file
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub file_path: std::path::PathBuf,
    pub elements_found: usize,
    pub relationships_found: usize,
}

/// Statistics about the analysis engine state
#[derive(Debug, Clone)]
pub struct EngineStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub total_files: usize,
}
