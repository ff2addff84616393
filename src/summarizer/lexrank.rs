//! LexRank sentence centrality
//!
//! Sentences become nodes; an edge joins two sentences whose idf-modified
//! cosine similarity exceeds a threshold. Each node spreads its score evenly
//! over its edges and scores are found by damped power iteration.

use rustc_hash::{FxHashMap, FxHashSet};

type TermWeights<'a> = FxHashMap<&'a str, f64>;

/// Scores produced by a ranking run, indexed like the input sentences.
#[derive(Debug, Clone)]
pub struct CentralityScores {
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

impl CentralityScores {
    /// Indices of the `n` best-scoring sentences, in document order.
    ///
    /// Equal scores keep the earlier sentence.
    pub fn top_in_document_order(&self, n: usize) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..self.scores.len()).collect();
        ranked.sort_by(|&a, &b| self.scores[b].total_cmp(&self.scores[a]));
        ranked.truncate(n);
        ranked.sort_unstable();
        ranked
    }
}

#[derive(Debug, Clone)]
pub struct LexRank {
    /// Minimum similarity for two sentences to be connected.
    pub threshold: f64,
    /// Probability of following an edge rather than jumping anywhere.
    pub damping: f64,
    pub max_iterations: usize,
    /// L1 change below which iteration stops.
    pub convergence: f64,
}

impl Default for LexRank {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            damping: 0.85,
            max_iterations: 100,
            convergence: 1e-6,
        }
    }
}

impl LexRank {
    /// Rank sentences given as lists of normalized terms.
    pub fn rank(&self, sentences: &[Vec<String>]) -> CentralityScores {
        let n = sentences.len();
        if n == 0 {
            return CentralityScores {
                scores: Vec::new(),
                iterations: 0,
                converged: true,
            };
        }

        let tf = term_frequencies(sentences);
        let idf = inverse_document_frequencies(sentences);
        let graph = self.similarity_graph(&tf, &idf);
        self.power_iteration(&graph)
    }

    /// Adjacency lists; every edge out of node `i` carries weight `1 / degree(i)`.
    fn similarity_graph(&self, tf: &[TermWeights<'_>], idf: &TermWeights<'_>) -> Vec<Vec<usize>> {
        let n = tf.len();
        let mut graph = vec![Vec::new(); n];

        for i in 0..n {
            for j in 0..n {
                if idf_modified_cosine(&tf[i], &tf[j], idf) > self.threshold {
                    graph[i].push(j);
                }
            }
        }

        graph
    }

    fn power_iteration(&self, graph: &[Vec<usize>]) -> CentralityScores {
        let n = graph.len();
        let uniform = 1.0 / n as f64;
        let teleport = (1.0 - self.damping) / n as f64;

        let mut scores = vec![uniform; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.convergence {
            iterations += 1;

            // Sentences with no edges (no usable terms) spread their mass evenly.
            let dangling: f64 = graph
                .iter()
                .zip(&scores)
                .filter(|(edges, _)| edges.is_empty())
                .map(|(_, score)| score)
                .sum();
            next.fill(teleport + self.damping * dangling / n as f64);

            for (node, edges) in graph.iter().enumerate() {
                if edges.is_empty() {
                    continue;
                }
                let share = self.damping * scores[node] / edges.len() as f64;
                for &neighbor in edges {
                    next[neighbor] += share;
                }
            }

            delta = scores.iter().zip(&next).map(|(old, new)| (old - new).abs()).sum();
            std::mem::swap(&mut scores, &mut next);
        }

        CentralityScores {
            scores,
            iterations,
            converged: delta <= self.convergence,
        }
    }
}

/// Term counts per sentence, divided by that sentence's highest count.
fn term_frequencies(sentences: &[Vec<String>]) -> Vec<TermWeights<'_>> {
    sentences
        .iter()
        .map(|terms| {
            let mut counts: TermWeights<'_> = FxHashMap::default();
            for term in terms {
                *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
            let max = counts.values().copied().fold(1.0, f64::max);
            for value in counts.values_mut() {
                *value /= max;
            }
            counts
        })
        .collect()
}

/// `ln(N / (1 + df))` where `df` is the number of sentences containing the term.
fn inverse_document_frequencies(sentences: &[Vec<String>]) -> TermWeights<'_> {
    let mut document_frequency: FxHashMap<&str, usize> = FxHashMap::default();
    for terms in sentences {
        let unique: FxHashSet<&str> = terms.iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    let total = sentences.len() as f64;
    document_frequency
        .into_iter()
        .map(|(term, df)| (term, (total / (1.0 + df as f64)).ln()))
        .collect()
}

fn idf_modified_cosine(a: &TermWeights<'_>, b: &TermWeights<'_>, idf: &TermWeights<'_>) -> f64 {
    let weight = |term: &str| idf.get(term).copied().unwrap_or(0.0);

    let numerator: f64 = a
        .iter()
        .filter_map(|(term, tf_a)| b.get(term).map(|tf_b| tf_a * tf_b * weight(*term).powi(2)))
        .sum();

    let norm = |tf: &TermWeights<'_>| {
        tf.iter()
            .map(|(term, value)| (value * weight(*term)).powi(2))
            .sum::<f64>()
            .sqrt()
    };
    let (norm_a, norm_b) = (norm(a), norm(b));

    if norm_a > 0.0 && norm_b > 0.0 {
        numerator / (norm_a * norm_b)
    } else {
        0.0
    }
}
