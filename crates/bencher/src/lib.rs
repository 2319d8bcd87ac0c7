//! Fixtures shared by the benches.

/// A request body compiled into the bench binary.
#[derive(Debug, Copy, Clone)]
pub struct Payload {
    name: &'static str,
    size: PayloadSize,
    content: &'static str,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    Small,
    Large,
}

impl Payload {
    pub const fn small(name: &'static str, content: &'static str) -> Self {
        Self { name, size: PayloadSize::Small, content }
    }

    pub const fn large(name: &'static str, content: &'static str) -> Self {
        Self { name, size: PayloadSize::Large, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> PayloadSize {
        self.size
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

pub static PAYLOADS: [Payload; 2] = [
    Payload::small("small.json", include_str!("../resources/payload/small.json")),
    Payload::large("large.json", include_str!("../resources/payload/large.json")),
];

/// Seeds of increasing length fed to the url benches.
pub const URL_SEEDS: [&str; 3] = [
    "http://localhost",
    "https://api.example.com:8443/v1/todos?page=2&size=50",
    "http://[2001:db8::1]:8080/a%20very/long/path/with%20escaped/segments/and/more?k=v&k=w&sort=title&filter=done+eq+true",
];
