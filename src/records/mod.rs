/*!
 * Localization records.
 *
 * Records are the only thing that crosses the human-translation boundary:
 *
 * - `model`: the `LocalizationEntry` record and its `Category` bucket
 * - `writer`: persists extracted buckets as editable JSON lists
 * - `loader`: reads translated lists back, repairing mis-encoded files once
 */

pub use self::loader::RecordLoader;
pub use self::model::{Category, LocalizationEntry};
pub use self::writer::RecordWriter;

pub mod loader;
pub mod model;
pub mod writer;
