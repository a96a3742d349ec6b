//! Typed per-field accessors
//!
//! [`tracked_document!`](crate::tracked_document) declares a document type
//! with a statically built schema and one set of accessor methods per field.
//! The methods are thin wrappers over the name-keyed [`Document`](crate::Document)
//! routines; no per-field logic is generated.
//!
//! ```
//! use fieldtrack_document::tracked_document;
//!
//! tracked_document! {
//!     /// A blog post
//!     pub struct Post {
//!         title: String,
//!         views: Int = 0,
//!         tags: Array,
//!     }
//! }
//!
//! let mut post = Post::new();
//! post.set_title("hello").unwrap();
//! assert!(post.title_changed());
//! // defaults count as changes from undefined until the first save
//! assert!(post.views_changed());
//! assert_eq!(post.views_was(), None);
//! ```

/// Declare a document type with typed field accessors.
///
/// For every field `x` this generates `x()`, `x_mut()`, `set_x(v)`,
/// `unset_x()`, `x_change()`, `x_changed()` and `x_was()`. Field types are
/// [`FieldType`](fieldtrack_core::FieldType) variant names; `= expr` declares
/// a default. A raw identifier such as `r#type` is stored under `type`.
///
/// # Reserved names
///
/// `schema`, `new`, `from_persisted`, `from_document` and `into_document` are
/// generated on every type, so a field with one of those names does not
/// compile. A field named after a [`Document`](crate::Document) method
/// (`id`, `save`, `changes`, ...) compiles, but its accessor shadows the
/// method reached through `Deref`; call it as `Document::id(&doc)` instead.
#[macro_export]
macro_rules! tracked_document {
    (@field $builder:ident, $field:ident, $ty:ident) => {
        $builder.field($crate::__private::field_key(stringify!($field)), $crate::__private::FieldType::$ty)
    };

    (@field $builder:ident, $field:ident, $ty:ident, $default:expr) => {
        $builder.field_with_default(
            $crate::__private::field_key(stringify!($field)),
            $crate::__private::FieldType::$ty,
            $default,
        )
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $field:ident : $ty:ident $(= $default:expr)? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            doc: $crate::Document,
        }

        impl $name {
            /// Schema shared by every instance of this type
            pub fn schema() -> ::std::sync::Arc<$crate::Schema> {
                static SCHEMA: $crate::__private::Lazy<::std::sync::Arc<$crate::Schema>> =
                    $crate::__private::Lazy::new(|| {
                        let builder = $crate::Schema::builder(stringify!($name));
                        $(
                            let builder = $crate::tracked_document!(
                                @field builder, $field, $ty $(, $default)?
                            );
                        )*
                        ::std::sync::Arc::new(
                            builder
                                .build()
                                .expect("tracked_document! fields are unique identifiers"),
                        )
                    });
                ::std::sync::Arc::clone(&SCHEMA)
            }

            /// New unsaved instance with defaults applied
            pub fn new() -> Self {
                Self {
                    doc: $crate::Document::new(Self::schema()),
                }
            }

            /// Instance rebuilt from stored attributes, with nothing dirty
            pub fn from_persisted(
                id: $crate::__private::DocumentId,
                attributes: $crate::Attributes,
            ) -> $crate::__private::Result<Self> {
                $crate::Document::from_persisted(Self::schema(), id, attributes)
                    .map(|doc| Self { doc })
            }

            /// Wrap a document built from this type's schema
            pub fn from_document(doc: $crate::Document) -> ::std::option::Option<Self> {
                ::std::sync::Arc::ptr_eq(doc.schema(), &Self::schema()).then(|| Self { doc })
            }

            /// Unwrap into the untyped document
            pub fn into_document(self) -> $crate::Document {
                self.doc
            }

            $crate::__private::paste! {
                $(
                    /// Read the field through the tracker
                    pub fn $field(
                        &mut self,
                    ) -> $crate::__private::Result<::std::option::Option<&$crate::__private::Value>> {
                        self.doc.get($crate::__private::field_key(stringify!($field)))
                    }

                    /// Mutable handle to the field
                    pub fn [<$field _mut>](
                        &mut self,
                    ) -> $crate::__private::Result<::std::option::Option<&mut $crate::__private::Value>> {
                        self.doc.get_mut($crate::__private::field_key(stringify!($field)))
                    }

                    /// Assign the field
                    pub fn [<set_ $field>](
                        &mut self,
                        value: impl ::std::convert::Into<$crate::__private::Value>,
                    ) -> $crate::__private::Result<()> {
                        self.doc.set($crate::__private::field_key(stringify!($field)), value)
                    }

                    /// Make the field undefined
                    pub fn [<unset_ $field>](
                        &mut self,
                    ) -> $crate::__private::Result<::std::option::Option<$crate::__private::Value>> {
                        self.doc.unset($crate::__private::field_key(stringify!($field)))
                    }

                    /// Prior and current value, if changed
                    pub fn [<$field _change>](&self) -> ::std::option::Option<$crate::FieldChange> {
                        self.doc.field_change($crate::__private::field_key(stringify!($field)))
                    }

                    /// Whether the field changed
                    pub fn [<$field _changed>](&self) -> bool {
                        self.doc.is_field_changed($crate::__private::field_key(stringify!($field)))
                    }

                    /// Value at the start of the cycle
                    pub fn [<$field _was>](&self) -> ::std::option::Option<$crate::__private::Value> {
                        self.doc.field_was($crate::__private::field_key(stringify!($field)))
                    }
                )*
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::Document;

            fn deref(&self) -> &Self::Target {
                &self.doc
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.doc
            }
        }
    };
}

/// Schema key for a declared field: raw identifiers lose their `r#` prefix
#[doc(hidden)]
pub fn field_key(ident: &'static str) -> &'static str {
    ident.strip_prefix("r#").unwrap_or(ident)
}
