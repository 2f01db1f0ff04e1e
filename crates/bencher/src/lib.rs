#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    line: TestLine,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, line: TestLine) -> Self {
        Self { name, group, line }
    }

    pub fn small(name: &'static str, line: TestLine) -> Self {
        Self::new(name, TestGroup::Small, line)
    }

    pub fn large(name: &'static str, line: TestLine) -> Self {
        Self::new(name, TestGroup::Large, line)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn line(&self) -> &TestLine {
        &self.line
    }

    pub fn content(&self) -> &'static str {
        self.line().content
    }
}

/// A raw header line, as found between two CRLFs of a message.
#[derive(Debug, Copy, Clone)]
pub struct TestLine {
    content: &'static str,
}

impl TestLine {
    pub const fn new(content: &'static str) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Large,
}
