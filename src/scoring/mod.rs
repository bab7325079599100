// Scoring engine: promotion detection per post, trend scoring per topic.
//
// Both detectors are pure and synchronous. They never touch the network and
// never fail; the sources are responsible for handing them clean posts.

pub mod promotion;
pub mod trend;
