// Render ports for the ephemeral overlay regions

/// `render(Some(..))` shows content, `render(None)` clears the region.
pub trait RenderPort<T: ?Sized> {
    fn render(&self, content: Option<&T>);
}

impl<T: ?Sized, F: Fn(Option<&T>)> RenderPort<T> for F {
    fn render(&self, content: Option<&T>) {
        self(content)
    }
}
