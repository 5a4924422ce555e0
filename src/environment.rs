use crate::error::RuntimeErrorKind;
use crate::object::Object;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

/// One lexical scope frame. Frames are shared by reference: a closure
/// keeps the frame it captured alive, and nested scopes point at (never
/// copy) their enclosing frame. Cycles through closures are expected and
/// simply leak on teardown.
pub struct Environment {
    values: HashMap<String, Object>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn from(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    pub fn define(&mut self, name: String, value: Object) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Result<Object, RuntimeErrorKind> {
        if let Some(object) = self.values.get(name) {
            return Ok(object.clone());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.as_ref().borrow().get(name),
            None => Err(RuntimeErrorKind::UndefinedVariable(name.to_string())),
        }
    }

    pub fn assign(&mut self, name: &str, value: Object) -> Result<(), RuntimeErrorKind> {
        if let Entry::Occupied(mut entry) = self.values.entry(name.to_string()) {
            entry.insert(value);
            return Ok(());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.as_ref().borrow_mut().assign(name, value),
            None => Err(RuntimeErrorKind::UndefinedVariable(name.to_string())),
        }
    }

    /// Reads from the frame exactly `distance` hops up the chain. No
    /// fallback search: the resolver guarantees the name lives there.
    pub fn get_at_distance(&self, distance: usize, name: &str) -> Result<Object, RuntimeErrorKind> {
        if distance == 0 {
            return self.read_local(name);
        }
        let ancestor = self.ancestor(distance);
        let frame = ancestor.as_ref().borrow();
        frame.read_local(name)
    }

    pub fn assign_at_distance(
        &mut self,
        distance: usize,
        name: &str,
        value: Object,
    ) -> Result<(), RuntimeErrorKind> {
        if distance == 0 {
            return self.write_local(name, value);
        }
        let ancestor = self.ancestor(distance);
        let mut frame = ancestor.as_ref().borrow_mut();
        frame.write_local(name, value)
    }

    fn read_local(&self, name: &str) -> Result<Object, RuntimeErrorKind> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeErrorKind::UndefinedVariable(name.to_string()))
    }

    fn write_local(&mut self, name: &str, value: Object) -> Result<(), RuntimeErrorKind> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RuntimeErrorKind::UndefinedVariable(name.to_string())),
        }
    }

    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self.enclosing.as_ref().unwrap().clone();
        let mut depth = 1;
        while depth < distance {
            depth += 1;
            let enclosing = environment.as_ref().borrow().enclosing.as_ref().unwrap().clone();
            environment = enclosing;
        }
        environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> Object {
        Object::Number(value)
    }

    fn assert_number(result: Result<Object, RuntimeErrorKind>, expected: f64) {
        match result {
            Ok(Object::Number(value)) => assert_eq!(value, expected),
            other => panic!("expected number {}, got {:?}", expected, other),
        }
    }

    fn assert_undefined(result: Result<Object, RuntimeErrorKind>, name: &str) {
        match result {
            Err(RuntimeErrorKind::UndefinedVariable(undefined)) => assert_eq!(undefined, name),
            other => panic!("expected undefined variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_that_get_walks_the_enclosing_chain() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().define("a".to_string(), number(1f64));
        let inner = Environment::from(global.clone());

        assert_number(inner.get("a"), 1f64);
        assert_undefined(inner.get("missing"), "missing");
    }

    #[test]
    fn test_that_assign_updates_the_defining_frame() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().define("a".to_string(), number(1f64));
        let mut inner = Environment::from(global.clone());

        inner.assign("a", number(2f64)).unwrap();
        assert_number(global.as_ref().borrow().get("a"), 2f64);
        assert_eq!(
            inner.assign("missing", number(0f64)),
            Err(RuntimeErrorKind::UndefinedVariable("missing".to_string()))
        );
    }

    #[test]
    fn test_that_get_at_distance_reads_the_exact_frame() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().define("a".to_string(), number(1f64));
        let middle = Rc::new(RefCell::new(Environment::from(global)));
        let mut inner = Environment::from(middle);
        inner.define("a".to_string(), number(3f64));

        assert_number(inner.get_at_distance(0, "a"), 3f64);
        assert_number(inner.get_at_distance(2, "a"), 1f64);
    }

    #[test]
    fn test_that_distance_lookup_never_falls_back_to_enclosing_frames() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().define("a".to_string(), number(1f64));
        let middle = Rc::new(RefCell::new(Environment::from(global)));
        let inner = Environment::from(middle);

        // "a" lives at distance 2. Addressing distance 1 must not keep
        // searching up the chain the way `get` would.
        assert_undefined(inner.get_at_distance(1, "a"), "a");
        assert_number(inner.get_at_distance(2, "a"), 1f64);
    }

    #[test]
    fn test_that_assign_at_distance_writes_the_exact_frame() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().define("a".to_string(), number(1f64));
        let mut inner = Environment::from(global.clone());
        inner.define("a".to_string(), number(3f64));

        inner.assign_at_distance(1, "a", number(9f64)).unwrap();
        assert_number(global.as_ref().borrow().get("a"), 9f64);
        assert_number(inner.get_at_distance(0, "a"), 3f64);
    }
}
