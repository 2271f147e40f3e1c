use crate::object::Handle;
use crate::ptype::TypeTag;

use hashbrown::HashMap;
use std::rc::Rc;

/// A pairwise coercion rule supplied by the surrounding system
///
/// Maps an ordered pair of type tags to a resulting tag, or `None` for
/// incompatible. Rules are expected to be symmetric; the registry tries
/// both orderings before giving up.
///
pub type CoercionRule = Rc<dyn Fn(&TypeTag, &TypeTag) -> Option<TypeTag>>;

/// A custom notion of size for a type the engine does not know
///
/// Records report rows rather than column count; custom types can hook
/// the same seam here.
///
pub type SizeRule = Rc<dyn Fn(&Handle) -> usize>;

/// Registry of custom type behavior
///
/// Consulted by the type lattice resolver only after the built-in
/// hierarchy fails to place a pair, and by [Registry::size_of] for any
/// handle whose type registers its own size concept.
///
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<(String, String), CoercionRule>,
    sizes: HashMap<String, SizeRule>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a coercion rule for an ordered pair of type identifiers.
    pub fn register<F>(&mut self, lhs: &str, rhs: &str, rule: F)
    where
        F: Fn(&TypeTag, &TypeTag) -> Option<TypeTag> + 'static,
    {
        self.rules
            .insert((lhs.to_string(), rhs.to_string()), Rc::new(rule));
    }

    /// Look up a rule for the pair, in either direction.
    pub fn resolve(&self, lhs: &TypeTag, rhs: &TypeTag) -> Option<TypeTag> {
        let l = lhs.identifier();
        let r = rhs.identifier();

        if let Some(rule) = self.rules.get(&(l.clone(), r.clone())) {
            return rule(lhs, rhs);
        }
        if let Some(rule) = self.rules.get(&(r, l)) {
            return rule(rhs, lhs);
        }
        None
    }

    /// Register a size concept for a type identifier.
    pub fn register_size<F>(&mut self, id: &str, rule: F)
    where
        F: Fn(&Handle) -> usize + 'static,
    {
        self.sizes.insert(id.to_string(), Rc::new(rule));
    }

    /// The size of a handle for recycling purposes.
    ///
    /// A registered size concept takes precedence; otherwise the
    /// handle's own notion applies (element count, or rows for records).
    ///
    pub fn size_of(&self, handle: &Handle) -> usize {
        match self.sizes.get(&handle.type_tag().identifier()) {
            Some(rule) => rule(handle),
            None => handle.len(),
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .field("sizes", &self.sizes.keys().collect::<Vec<_>>())
            .finish()
    }
}
