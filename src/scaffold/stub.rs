/// Path segment that anchors group nesting.
pub const ROOT_MARKER: &str = "src";

/// Nested groups plus the pending test they wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubDescriptor {
    pub groups: Vec<String>,
    pub leaf: String,
}

impl StubDescriptor {
    /// Groups are the folder segments after the first `src` segment. A path
    /// without `src` loses every segment. With nothing left the leaf name
    /// becomes the only group, so there is always at least one wrapper.
    pub fn new(folder_path: &str, leaf: &str) -> Self {
        let mut segments = folder_path.split('/').skip_while(|s| *s != ROOT_MARKER);
        segments.next();

        let mut groups: Vec<String> = segments.map(str::to_string).collect();
        if groups.is_empty() {
            groups.push(leaf.to_string());
        }

        Self {
            groups,
            leaf: leaf.to_string(),
        }
    }

    pub fn render(&self) -> String {
        let depth = self.groups.len();
        let mut lines = Vec::with_capacity(depth * 2 + 1);

        for (level, group) in self.groups.iter().enumerate() {
            lines.push(format!("{}describe(\"{group}\", () => {{", tabs(level)));
        }

        lines.push(format!("{}test.todo(\"{}\");", tabs(depth + 1), self.leaf));

        for level in (0..depth).rev() {
            lines.push(format!("{}}});", tabs(level)));
        }

        lines.join("\n")
    }
}

pub fn render_stub(folder_path: &str, leaf: &str) -> String {
    StubDescriptor::new(folder_path, leaf).render()
}

fn tabs(count: usize) -> String {
    "\t".repeat(count)
}
