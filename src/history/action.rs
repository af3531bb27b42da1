use super::Action;

type Step<C> = Box<dyn Fn(&mut C)>;

/// An action built from a pair of closures over captured data.
pub struct FnAction<C> {
    label: String,
    forward: Step<C>,
    backward: Step<C>,
}

impl<C> FnAction<C> {
    pub fn new(
        label: impl Into<String>,
        forward: impl Fn(&mut C) + 'static,
        backward: impl Fn(&mut C) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            forward: Box::new(forward),
            backward: Box::new(backward),
        }
    }
}

impl<C> Action<C> for FnAction<C> {
    fn forward(&self, ctx: &mut C) {
        (self.forward)(ctx)
    }

    fn backward(&self, ctx: &mut C) {
        (self.backward)(ctx)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Several actions undone and redone as one step.
///
/// Children run forward in order and backward in reverse order.
pub struct CompositeAction<C> {
    label: String,
    children: Vec<Box<dyn Action<C>>>,
}

impl<C> CompositeAction<C> {
    pub fn new(label: impl Into<String>, children: Vec<Box<dyn Action<C>>>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Action<C> for CompositeAction<C> {
    fn forward(&self, ctx: &mut C) {
        for child in &self.children {
            child.forward(ctx);
        }
    }

    fn backward(&self, ctx: &mut C) {
        for child in self.children.iter().rev() {
            child.backward(ctx);
        }
    }

    fn describe(&self) -> String {
        self.label.clone()
    }

    fn memory_size(&self) -> usize {
        self.children.iter().map(|c| c.memory_size()).sum()
    }
}

/// Swaps forward and backward of the wrapped action.
pub struct InverseAction<C> {
    inner: Box<dyn Action<C>>,
}

impl<C> InverseAction<C> {
    pub fn new(inner: Box<dyn Action<C>>) -> Self {
        Self { inner }
    }
}

impl<C> Action<C> for InverseAction<C> {
    fn forward(&self, ctx: &mut C) {
        self.inner.backward(ctx);
    }

    fn backward(&self, ctx: &mut C) {
        self.inner.forward(ctx);
    }

    fn describe(&self) -> String {
        format!("Revert {}", self.inner.describe())
    }

    fn memory_size(&self) -> usize {
        self.inner.memory_size()
    }
}
