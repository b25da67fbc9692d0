//! Symbolic-to-direct reference resolution.
//!
//! [`ReferenceResolver`] holds no state of its own. It walks records handed
//! out by whatever backend is registered with the [`RefDatabase`], so its
//! guarantees hold for any backend, including one that hands out cycles or
//! endless chains:
//!
//! - the result is always a direct record, and
//! - the walk stops after `max_redirects` symbolic hops with
//!   [`RefError::TooManyRedirects`].

use tracing::trace;

use crate::database::RefDatabase;
use crate::error::{RefError, Result};
use crate::types::{ReferenceRecord, ResolvedReference};

/// Resolves reference names through symbolic indirections.
#[derive(Clone, Copy, Debug)]
pub struct ReferenceResolver<'a> {
    refdb: &'a RefDatabase,
    max_redirects: usize,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(refdb: &'a RefDatabase, max_redirects: usize) -> Self {
        Self {
            refdb,
            max_redirects,
        }
    }

    /// The number of symbolic hops this resolver follows before giving up.
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Resolve `name` to the direct record at the end of its chain.
    pub fn resolve(&self, name: &str) -> Result<ReferenceRecord> {
        self.resolve_chain(name).map(|resolved| resolved.record())
    }

    /// Resolve `name`, recording every name visited.
    ///
    /// Fails with [`RefError::NotFound`] naming the first hop that does not
    /// exist, or [`RefError::TooManyRedirects`] when more than
    /// `max_redirects` symbolic records are encountered.
    pub fn resolve_chain(&self, name: &str) -> Result<ResolvedReference> {
        let mut chain = vec![name.to_string()];

        loop {
            let current = &chain[chain.len() - 1];
            let record = self.refdb.lookup(current)?.ok_or_else(|| RefError::NotFound {
                name: current.clone(),
            })?;

            match record {
                ReferenceRecord::Direct(target) => {
                    trace!(name, hops = chain.len() - 1, %target, "resolved ref");
                    return Ok(ResolvedReference { chain, target });
                }
                ReferenceRecord::Symbolic(next) => {
                    if chain.len() > self.max_redirects {
                        return Err(RefError::TooManyRedirects {
                            name: name.to_string(),
                            max: self.max_redirects,
                        });
                    }
                    chain.push(next);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use proptest::prelude::*;
    use refdb_types::ContentId;

    use super::*;
    use crate::backend::{BackendResult, RefdbBackend};
    use crate::memory::InMemoryBackend;

    fn oid(byte: u8) -> ContentId {
        ContentId::from_hash([byte; 20])
    }

    /// Hands out a fresh symbolic record for every lookup, forever.
    #[derive(Default)]
    struct EndlessChain {
        lookups: AtomicUsize,
    }

    impl RefdbBackend for EndlessChain {
        fn exists(&self, _name: &str) -> BackendResult<bool> {
            Ok(true)
        }
        fn lookup(&self, _name: &str) -> BackendResult<Option<ReferenceRecord>> {
            let n = self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(Some(ReferenceRecord::symbolic(format!("refs/heads/n{n}"))))
        }
        fn write(&self, _name: &str, _record: &ReferenceRecord) -> BackendResult<()> {
            Ok(())
        }
        fn delete(&self, _name: &str) -> BackendResult<bool> {
            Ok(false)
        }
        fn free(&mut self) {}
    }

    /// Build a database holding `HEAD -> l1 -> ... -> ln -> direct`.
    fn chain_of(hops: usize) -> RefDatabase {
        let mut backend = InMemoryBackend::new();
        let mut previous = "HEAD".to_string();
        for i in 0..hops {
            let next = format!("refs/heads/l{i}");
            backend = backend.with_record(previous, ReferenceRecord::symbolic(next.clone()));
            previous = next;
        }
        RefDatabase::new(backend.with_record(previous, ReferenceRecord::direct(oid(1))))
    }

    // ---- Scenario: HEAD -> refs/heads/testref -> d828f11... ----
    #[test]
    fn resolves_head_through_branch() {
        let id = ContentId::from_hex("d828f118b334a9396ca129f2c733bae8ce6faa8d").unwrap();
        let db = RefDatabase::new(
            InMemoryBackend::new()
                .with_record("HEAD", ReferenceRecord::symbolic("refs/heads/testref"))
                .with_record("refs/heads/testref", ReferenceRecord::direct(id)),
        );

        assert_eq!(
            db.lookup("HEAD").unwrap(),
            Some(ReferenceRecord::symbolic("refs/heads/testref"))
        );
        assert_eq!(db.resolve("HEAD").unwrap(), ReferenceRecord::Direct(id));

        let resolved = db.resolve_chain("HEAD").unwrap();
        assert_eq!(resolved.chain, vec!["HEAD", "refs/heads/testref"]);
        assert_eq!(resolved.direct_name(), "refs/heads/testref");
    }

    #[test]
    fn direct_ref_resolves_to_itself() {
        let db = chain_of(0);
        let resolved = db.resolve_chain("HEAD").unwrap();
        assert_eq!(resolved.hops(), 0);
        assert_eq!(resolved.target, oid(1));
    }

    #[test]
    fn symbolic_write_then_resolve_reaches_direct() {
        let db = RefDatabase::new(InMemoryBackend::new());
        db.write_direct("refs/heads/main", oid(4)).unwrap();
        db.write_symbolic("HEAD", "refs/heads/main").unwrap();
        assert_eq!(db.resolve("HEAD").unwrap(), ReferenceRecord::Direct(oid(4)));
    }

    #[test]
    fn missing_hop_is_reported_by_name() {
        let db = RefDatabase::new(
            InMemoryBackend::new().with_record("HEAD", ReferenceRecord::symbolic("refs/heads/unborn")),
        );
        let err = db.resolve("HEAD").unwrap_err();
        assert!(matches!(err, RefError::NotFound { ref name } if name == "refs/heads/unborn"));
    }

    #[test]
    fn cycle_fails_with_too_many_redirects() {
        let db = RefDatabase::new(
            InMemoryBackend::new()
                .with_record("HEAD", ReferenceRecord::symbolic("refs/heads/a"))
                .with_record("refs/heads/a", ReferenceRecord::symbolic("refs/heads/b"))
                .with_record("refs/heads/b", ReferenceRecord::symbolic("refs/heads/a")),
        );
        let err = db.resolve("HEAD").unwrap_err();
        assert!(matches!(err, RefError::TooManyRedirects { max: 5, .. }));
    }

    #[test]
    fn self_reference_fails_with_too_many_redirects() {
        let db = RefDatabase::new(
            InMemoryBackend::new().with_record("HEAD", ReferenceRecord::symbolic("HEAD")),
        );
        assert!(matches!(
            db.resolve("HEAD").unwrap_err(),
            RefError::TooManyRedirects { .. }
        ));
    }

    #[test]
    fn endless_backend_chain_terminates() {
        let db = RefDatabase::new(EndlessChain::default());
        assert!(matches!(
            db.resolve("HEAD").unwrap_err(),
            RefError::TooManyRedirects { .. }
        ));
    }

    #[test]
    fn depth_limit_is_inclusive() {
        assert!(chain_of(5).resolve("HEAD").is_ok());
        assert!(matches!(
            chain_of(6).resolve("HEAD").unwrap_err(),
            RefError::TooManyRedirects { .. }
        ));
    }

    #[test]
    fn zero_limit_rejects_any_symbolic_hop() {
        let db = chain_of(1);
        let resolver = ReferenceResolver::new(&db, 0);
        assert!(resolver.resolve("refs/heads/l0").is_ok());
        assert!(resolver.resolve("HEAD").is_err());
    }

    /// What a pool entry holds: nothing, a pointer to another pool name, or an id.
    #[derive(Clone, Debug)]
    enum Slot {
        Missing,
        Symbolic(usize),
        Direct(u8),
    }

    const POOL: [&str; 5] = [
        "HEAD",
        "refs/heads/a",
        "refs/heads/b",
        "refs/heads/c",
        "refs/heads/d",
    ];

    fn slot() -> impl Strategy<Value = Slot> {
        prop_oneof![
            Just(Slot::Missing),
            (0..POOL.len()).prop_map(Slot::Symbolic),
            any::<u8>().prop_map(Slot::Direct),
        ]
    }

    /// Walk the slots directly to predict the resolver's answer.
    fn model(slots: &[Slot], max: usize) -> std::result::Result<u8, &'static str> {
        let mut index = 0;
        let mut hops = 0;
        loop {
            match slots[index] {
                Slot::Missing => return Err("not found"),
                Slot::Direct(byte) => return Ok(byte),
                Slot::Symbolic(next) => {
                    if hops == max {
                        return Err("too many redirects");
                    }
                    hops += 1;
                    index = next;
                }
            }
        }
    }

    proptest! {
        #[test]
        fn resolve_never_returns_symbolic(slots in proptest::collection::vec(slot(), POOL.len())) {
            let mut backend = InMemoryBackend::new();
            for (name, slot) in POOL.iter().zip(&slots) {
                match slot {
                    Slot::Missing => {}
                    Slot::Symbolic(i) => {
                        backend = backend.with_record(*name, ReferenceRecord::symbolic(POOL[*i]));
                    }
                    Slot::Direct(b) => {
                        backend = backend.with_record(*name, ReferenceRecord::direct(oid(*b)));
                    }
                }
            }
            let db = RefDatabase::new(backend);

            match (db.resolve("HEAD"), model(&slots, 5)) {
                (Ok(record), Ok(byte)) => prop_assert_eq!(record, ReferenceRecord::Direct(oid(byte))),
                (Err(RefError::NotFound { .. }), Err("not found")) => {}
                (Err(RefError::TooManyRedirects { .. }), Err("too many redirects")) => {}
                (got, expected) => prop_assert!(false, "got {:?}, expected {:?}", got, expected),
            }
        }

        #[test]
        fn chain_length_decides_success(hops in 0usize..12) {
            let result = chain_of(hops).resolve("HEAD");
            prop_assert_eq!(result.is_ok(), hops <= 5);
        }
    }

    #[test]
    fn model_agrees_on_cycle() {
        let slots = vec![
            Slot::Symbolic(1),
            Slot::Symbolic(2),
            Slot::Symbolic(1),
            Slot::Missing,
            Slot::Missing,
        ];
        assert_eq!(model(&slots, 5), Err("too many redirects"));
    }
}
