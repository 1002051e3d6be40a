//! The subtype judgment `t1 :> t2`.

use crate::error::Result;
use crate::hierarchy::reduce;
use crate::loader::ClassLoader;
use crate::ty::{Reference, Type};

/// Decide whether `t2` is a subtype of `t1` (`t1 :> t2`).
///
/// The relation is reflexive, transitive, and anti-symmetric except at
/// equality:
///
/// 1. `t1 :> t1` always holds
/// 2. if `t1 :> t2` and `t2 :> t3`, then `t1 :> t3`
/// 3. if `t1 :> t2` then not `t2 :> t1` (unless `t1 == t2`)
///
/// Rules, first match wins: null is a subtype of every reference type; two
/// class types delegate to hierarchy reduction; primitives follow the JLS
/// widening chain; arrays are covariant on their element types (Java's
/// unsound array covariance is deliberately preserved); anything else,
/// including any mixed-kind pairing, is not a subtype.
///
/// The only error condition is a class loading failure while walking a
/// hierarchy.
pub fn subtype(loader: &dyn ClassLoader, t1: &Type, t2: &Type) -> Result<bool> {
    if t1 == t2 {
        return Ok(true);
    }
    match (t1, t2) {
        (Type::Reference(_), Type::Reference(Reference::Null)) => Ok(true),
        (Type::Reference(Reference::Clazz(c1)), Type::Reference(Reference::Clazz(c2))) => {
            Ok(reduce(loader, c1, c2)?.is_some())
        }
        (Type::Primitive(p1), Type::Primitive(p2)) => Ok(p1.widens_from(*p2)),
        (Type::Reference(Reference::Array(e1)), Type::Reference(Reference::Array(e2))) => {
            subtype(loader, e1, e2)
        }
        _ => Ok(false),
    }
}
