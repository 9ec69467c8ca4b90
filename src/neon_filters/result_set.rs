use crate::neon_filters::benchmark::BenchmarkResult;
use crate::neon_filters::filter::Implementation;

/// Benchmark results keyed by `(filter_name, implementation)`
///
/// Inserting a result whose key is already present replaces the stored
/// result in place, so each key appears at most once and the original
/// insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    results: Vec<BenchmarkResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `result`, returning the result it replaced if any.
    pub fn insert(&mut self, result: BenchmarkResult) -> Option<BenchmarkResult> {
        match self.position(&result.filter_name, result.implementation) {
            Some(index) => Some(std::mem::replace(&mut self.results[index], result)),
            None => {
                self.results.push(result);
                None
            }
        }
    }

    pub fn get(
        &self,
        filter_name: &str,
        implementation: Implementation,
    ) -> Option<&BenchmarkResult> {
        self.position(filter_name, implementation)
            .map(|index| &self.results[index])
    }

    pub fn remove(
        &mut self,
        filter_name: &str,
        implementation: Implementation,
    ) -> Option<BenchmarkResult> {
        self.position(filter_name, implementation)
            .map(|index| self.results.remove(index))
    }

    /// Drops every stored result and stores `results` instead.
    pub fn replace_all(&mut self, results: impl IntoIterator<Item = BenchmarkResult>) {
        self.results.clear();
        self.extend(results);
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkResult> {
        self.results.iter()
    }

    /// How many times faster the performance kernel ran than the reference
    /// path for `filter_name`.
    ///
    /// `None` unless both results are present and the performance time is
    /// non-zero.
    pub fn speedup(&self, filter_name: &str) -> Option<f64> {
        let reference = self.get(filter_name, Implementation::Reference)?;
        let performance = self.get(filter_name, Implementation::Performance)?;
        (performance.average_time_ms > 0.0)
            .then(|| reference.average_time_ms / performance.average_time_ms)
    }

    fn position(&self, filter_name: &str, implementation: Implementation) -> Option<usize> {
        self.results
            .iter()
            .position(|r| r.filter_name == filter_name && r.implementation == implementation)
    }
}

impl Extend<BenchmarkResult> for ResultSet {
    fn extend<I: IntoIterator<Item = BenchmarkResult>>(&mut self, iter: I) {
        for result in iter {
            self.insert(result);
        }
    }
}

impl FromIterator<BenchmarkResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = BenchmarkResult>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ResultSet {
    type Item = BenchmarkResult;
    type IntoIter = std::vec::IntoIter<BenchmarkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a BenchmarkResult;
    type IntoIter = std::slice::Iter<'a, BenchmarkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
