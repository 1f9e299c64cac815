// src/contexting/contextual.rs
//! Values paired with flag contexts.

use crate::algebras::Delta;
use crate::error::StageError;
use crate::flags::{Flag, FlagSet, Point};
use std::fmt;

/// The context of a [`Contextual`]: a flag sum, or a flag sum that itself
/// carries a context.
///
/// A layered context is read innermost first. `Context::layered([c1, c2, c3])`
/// is `c1 when (c2 when c3)`; `c1` is the value's immediate context and `c3`
/// the outermost layer.
#[derive(Clone, PartialEq, Debug)]
pub enum Context {
    Flags(FlagSet),
    Meta(Box<Contextual<FlagSet>>),
}

impl Context {
    pub fn nothing() -> Self {
        Self::Flags(FlagSet::nothing())
    }

    /// Builds a context from its levels, innermost first.
    ///
    /// No levels at all is the `nothing` context.
    pub fn layered(levels: impl IntoIterator<Item = FlagSet>) -> Self {
        let mut levels: Vec<FlagSet> = levels.into_iter().collect();
        let mut context = match levels.pop() {
            Some(outermost) => Self::Flags(outermost),
            None => return Self::nothing(),
        };

        while let Some(level) = levels.pop() {
            context = Self::Meta(Box::new(Contextual {
                value: level,
                context,
            }));
        }
        context
    }

    /// Every level, innermost first.
    pub fn levels(&self) -> Vec<&FlagSet> {
        let mut levels = Vec::new();
        let mut current = self;
        loop {
            match current {
                Self::Flags(flags) => {
                    levels.push(flags);
                    return levels;
                }
                Self::Meta(meta) => {
                    levels.push(&meta.value);
                    current = &meta.context;
                }
            }
        }
    }

    /// Number of levels; a flat context has depth 1.
    pub fn depth(&self) -> usize {
        self.levels().len()
    }

    pub fn is_meta(&self) -> bool {
        matches!(self, Self::Meta(_))
    }

    /// Unions every level into one sum, innermost level first.
    pub fn flatten(&self) -> FlagSet {
        FlagSet::sum(self.levels().into_iter().cloned())
    }

    /// Merges the two outermost levels. Flat contexts are returned unchanged.
    pub fn reduced(&self) -> Self {
        let mut levels: Vec<FlagSet> = self.levels().into_iter().cloned().collect();
        if let (Some(outermost), Some(next)) = (levels.pop(), levels.pop()) {
            levels.push(next.union(&outermost));
        }
        Self::layered(levels)
    }

    /// Applies `delta` to the innermost level, keeping the outer levels.
    pub fn apply(&self, delta: &dyn Delta) -> Self {
        match self {
            Self::Flags(flags) => Self::Flags(delta.apply(flags)),
            Self::Meta(meta) => Self::Meta(Box::new(Contextual {
                value: delta.apply(&meta.value),
                context: meta.context.clone(),
            })),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::nothing()
    }
}

impl From<FlagSet> for Context {
    fn from(flags: FlagSet) -> Self {
        Self::Flags(flags)
    }
}

impl From<Flag> for Context {
    fn from(flag: Flag) -> Self {
        Self::Flags(FlagSet::from(flag))
    }
}

impl From<Contextual<FlagSet>> for Context {
    fn from(meta: Contextual<FlagSet>) -> Self {
        Self::Meta(Box::new(meta))
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels = self.levels();
        let (outermost, inner) = match levels.split_last() {
            Some(split) => split,
            None => return Ok(()),
        };

        for level in inner {
            write!(f, "({} when ", level)?;
        }
        write!(f, "{}", outermost)?;
        for _ in inner {
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// A value together with the context it was produced in.
#[derive(Clone, PartialEq, Debug)]
pub struct Contextual<V> {
    value: V,
    context: Context,
}

impl<V> Contextual<V> {
    /// `value` in the `nothing` context.
    pub fn new(value: V) -> Self {
        Self {
            value,
            context: Context::nothing(),
        }
    }

    pub fn with(value: V, context: impl Into<Context>) -> Self {
        Self {
            value,
            context: context.into(),
        }
    }

    /// `value` in a layered context; see [`Context::layered`].
    pub fn nested(value: V, levels: impl IntoIterator<Item = FlagSet>) -> Self {
        Self::with(value, Context::layered(levels))
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The context flattened into a single sum.
    pub fn flags(&self) -> FlagSet {
        self.context.flatten()
    }

    pub fn into_parts(self) -> (V, Context) {
        (self.value, self.context)
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Replaces the context.
    pub fn contexted(self, context: impl Into<Context>) -> Self {
        Self::with(self.value, context)
    }

    /// Transforms the value, keeping the context.
    pub fn map<U>(self, action: impl FnOnce(V) -> U) -> Contextual<U> {
        Contextual {
            value: action(self.value),
            context: self.context,
        }
    }

    pub fn try_map<U, E>(self, action: impl FnOnce(V) -> Result<U, E>) -> Result<Contextual<U>, E> {
        Ok(Contextual {
            value: action(self.value)?,
            context: self.context,
        })
    }

    /// Transforms the flattened context, keeping the value.
    pub fn map_context(self, action: impl FnOnce(FlagSet) -> FlagSet) -> Self {
        let flags = action(self.context.flatten());
        Self::with(self.value, flags)
    }

    /// Derives a new flattened context from the value and the current one.
    pub fn write_context(self, action: impl FnOnce(&V, FlagSet) -> FlagSet) -> Self {
        let flags = action(&self.value, self.context.flatten());
        Self::with(self.value, flags)
    }

    /// Derives a new value from the current one and the flattened context.
    pub fn read<U>(self, action: impl FnOnce(V, &FlagSet) -> U) -> Contextual<U> {
        let flags = self.context.flatten();
        Contextual {
            value: action(self.value, &flags),
            context: self.context,
        }
    }

    /// Keeps only the context atoms whose point satisfies `predicate`.
    ///
    /// The result is flat and `nothing` if no atom matches.
    pub fn retain_context(self, predicate: impl Fn(&Point) -> bool) -> Self {
        self.map_context(|flags| flags.that(predicate))
    }

    /// Adds `flags` to the immediate context.
    pub fn add_context(self, flags: impl Into<FlagSet>) -> Self {
        let delta = flags.into().adding();
        self.apply_delta(&delta)
    }

    /// Applies `delta` to the immediate context.
    pub fn apply_delta(self, delta: &dyn Delta) -> Self {
        let context = self.context.apply(delta);
        Self::with(self.value, context)
    }

    pub fn is_metacontextual(&self) -> bool {
        self.context.is_meta()
    }

    /// Merges the two outermost context levels.
    pub fn with_reduced_metacontext(self) -> Self {
        let context = self.context.reduced();
        Self::with(self.value, context)
    }

    /// Merges every context level into one flat sum.
    pub fn without_metacontext(self) -> Self {
        let flags = self.context.flatten();
        Self::with(self.value, flags)
    }

    /// `true` when `flag` appears at any level of the context.
    pub fn is_flagged(&self, flag: &Flag) -> bool {
        self.context.levels().into_iter().any(|level| level.contains(flag))
    }

    /// The first stage error recorded anywhere in the context, innermost
    /// level first.
    pub fn stage_error(&self) -> Option<StageError> {
        self.context
            .levels()
            .into_iter()
            .flat_map(FlagSet::iter)
            .find_map(|flag| flag.point_as::<StageError>().cloned())
    }
}

impl Contextual<FlagSet> {
    /// Swaps the value and the context.
    ///
    /// The old value becomes a flat context and the old context, flattened,
    /// becomes the value.
    pub fn context_oriented(self) -> Self {
        let flags = self.context.flatten();
        Self::with(flags, self.value)
    }
}

impl<V> From<V> for Contextual<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<V: fmt::Display> fmt::Display for Contextual<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} when {}", self.value, self.context)
    }
}
