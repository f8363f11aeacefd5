
use std::path::PathBuf;

use crate::{ArchiveRecord, Reference, ScanSnapshot, Target};

/// Archive record at `/libs/<file>` with an explicit module name.
pub(crate) fn record(name: &str) -> ArchiveRecord {
    ArchiveRecord::new(format!("/libs/{name}.jar")).name(name)
}

pub(crate) fn libs() -> Vec<PathBuf> {
    vec![PathBuf::from("/libs")]
}

/// `A` exports `a.api`/`a.impl`, provides `S` with `A.Impl`, references `B`
/// from its API and `B`, `C` from its implementation.
pub(crate) fn example_a() -> ScanSnapshot {
    ScanSnapshot::new()
        .archive(
            record("A")
                .packages(["a.impl", "a.api"])
                .provides("S", ["A.Impl"]),
        )
        .api_reference("A", Reference::new("a.api.Foo", "b.Bar", Target::module("B")))
        .reference("A", Reference::new("a.api.Foo", "b.Bar", Target::module("B")))
        .reference("A", Reference::new("a.impl.Impl", "c.Baz", Target::module("C")))
        .reference("A", Reference::new("a.impl.Impl", "java.util.List", Target::module("java.base")))
}

/// `D` references a class nobody provides; sibling `E` resolves everything.
pub(crate) fn example_d_e() -> ScanSnapshot {
    ScanSnapshot::new()
        .archive(record("D").packages(["d"]))
        .archive(record("E").packages(["e"]))
        .reference("D", Reference::new("d.Main", "e.Util", Target::module("E")))
        .reference("D", Reference::new("d.Main", "x.Gone", Target::NotFound))
        .reference("E", Reference::new("e.Util", "java.sql.Connection", Target::module("java.sql")))
}
