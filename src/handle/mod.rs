/*!
 * Handle Module
 * Arity-erased callable capabilities (0..=4 parameters, optional value)
 */

mod callable;

pub use callable::Handle;
