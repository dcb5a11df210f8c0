use super::Defect;
use std::collections::HashMap;

/// The ground-truth defects of one run, keyed by name.
///
/// Iteration follows insertion (catalog file) order.
#[derive(Debug, Clone, Default)]
pub struct DefectCatalog {
    defects: Vec<Defect>,
    index: HashMap<String, usize>,
}

impl DefectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a defect. Returns the rejected defect if its name is already taken.
    pub fn insert(&mut self, defect: Defect) -> Result<(), Defect> {
        if self.index.contains_key(&defect.name) {
            return Err(defect);
        }
        self.index.insert(defect.name.clone(), self.defects.len());
        self.defects.push(defect);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Defect> {
        self.index.get(name).map(|&i| &self.defects[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Defect> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.defects[i]),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.defects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Defect> {
        self.defects.iter()
    }
}

impl<'a> IntoIterator for &'a DefectCatalog {
    type Item = &'a Defect;
    type IntoIter = std::slice::Iter<'a, Defect>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Defect> for DefectCatalog {
    /// # Panics
    ///
    /// Panics on a duplicate name. Use [`DefectCatalog::insert`] for untrusted input.
    fn from_iter<I: IntoIterator<Item = Defect>>(iter: I) -> Self {
        let mut catalog = DefectCatalog::new();
        for defect in iter {
            if let Err(dup) = catalog.insert(defect) {
                panic!("duplicate defect name '{}'", dup.name);
            }
        }
        catalog
    }
}
