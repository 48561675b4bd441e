//! Lookup of solvers by `(year, day)`

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

/// 2015, the first Advent of Code
pub const BASE_YEAR: u16 = 2015;
/// Years covered by the storage, `BASE_YEAR..BASE_YEAR + MAX_YEARS`
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
/// One slot per supported `(year, day)`
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Slot of `(year, day)`, `None` outside the supported range
#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    let year_offset = usize::from(year.checked_sub(BASE_YEAR)?);
    let day_offset = usize::from(day.checked_sub(1)?);
    (year_offset < MAX_YEARS && day_offset < DAYS_PER_YEAR)
        .then_some(year_offset * DAYS_PER_YEAR + day_offset)
}

/// Inverse of [`calc_index`]
#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

/// Parses an input into a ready-to-solve instance
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What the registry knows about a solver without creating it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    /// The solver's `PARTS`
    pub parts: u8,
}

/// A registered factory and the part count of the solver behind it
struct Entry {
    factory: SolverFactory,
    parts: u8,
}

impl Entry {
    fn info(&self, year: u16, day: u8) -> FactoryInfo {
        FactoryInfo {
            year,
            day,
            parts: self.parts,
        }
    }
}

/// Factories in a flat `Vec` with one slot per `(year, day)`
pub struct SolverFactoryStorage {
    slots: Vec<Option<Entry>>,
}

impl SolverFactoryStorage {
    fn entry(&self, year: u16, day: u8) -> Option<&Entry> {
        self.slots.get(calc_index(year, day)?)?.as_ref()
    }

    /// Registered solvers in `(year, day)` order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let (year, day) = from_index(index);
            slot.as_ref().map(|entry| entry.info(year, day))
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        self.entry(year, day).map(|entry| entry.info(year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.entry(year, day).is_some()
    }

    /// Number of registered solvers
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects solvers, then freezes them into a [`SolverRegistry`]
///
/// Each `(year, day)` takes one solver. Registering the same slot twice or a
/// day outside the supported range is an error.
///
/// ```no_run
/// # use aoc_solver::SolverRegistryBuilder;
/// let registry = SolverRegistryBuilder::new()
///     .register_solver_plugins(|plugin| plugin.tags.contains(&"2017"))
///     .unwrap()
///     .build();
/// ```
pub struct SolverRegistryBuilder {
    slots: Vec<Option<Entry>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(CAPACITY).collect(),
        }
    }

    /// Put `factory` in the `(year, day)` slot
    pub fn register_factory<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let slot = calc_index(year, day)
            .and_then(|index| self.slots.get_mut(index))
            .ok_or(RegistrationError::InvalidYearDay(year, day))?;
        if slot.is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        *slot = Some(Entry {
            factory: Box::new(factory),
            parts,
        });
        tracing::debug!(year, day, parts, "registered solver");
        Ok(self)
    }

    /// Register `S`, parsing into a [`SolverInstance`]
    pub fn register<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, move |input: &str| {
            SolverInstance::<S>::new(year, day, input)
                .map(|instance| Box::new(instance) as Box<dyn DynSolver + '_>)
        })
    }

    /// Every [`SolverPlugin`] linked into the binary
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// The linked [`SolverPlugin`]s accepted by `filter`
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2017 && plugin.day <= 10)
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        inventory::iter::<SolverPlugin>()
            .filter(|plugin| filter(plugin))
            .try_fold(self, |builder, plugin| {
                plugin.solver.register_with(builder, plugin.year, plugin.day)
            })
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            storage: SolverFactoryStorage { slots: self.slots },
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable set of solvers, shared across worker threads
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` with the solver registered for `(year, day)`
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        if calc_index(year, day).is_none() {
            return Err(SolverError::InvalidYearDay(year, day));
        }
        let entry = self
            .storage
            .entry(year, day)
            .ok_or(SolverError::NotFound(year, day))?;
        Ok((entry.factory)(input)?)
    }
}

/// Registration hook with no associated types
///
/// Differently typed solvers can then sit behind the same
/// `&'static dyn RegisterableSolver`. Every [`Solver`] gets it through a
/// blanket impl.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register::<S>(year, day)
    }
}

/// A solver submitted to `inventory` for link-time discovery
///
/// `#[derive(AutoRegisterSolver)]` emits one of these; the hand-written
/// equivalent for a one-part puzzle is:
///
/// ```no_run
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
///
/// struct Spinlock;
///
/// impl AocParser for Spinlock {
///     type SharedData<'a> = usize;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input.trim().parse().map_err(|_| ParseError::InvalidFormat(input.into()))
///     }
/// }
///
/// impl Solver for Spinlock {
///     const PARTS: u8 = 1;
///
///     fn solve_part(step: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         if part != 1 {
///             return Err(SolveError::PartNotImplemented(part));
///         }
///         let (mut buffer, mut position) = (vec![0], 0);
///         for value in 1..=2017 {
///             position = (position + *step) % buffer.len() + 1;
///             buffer.insert(position, value);
///         }
///         Ok(buffer[(position + 1) % buffer.len()].to_string())
///     }
/// }
///
/// aoc_solver::inventory::submit! {
///     SolverPlugin {
///         year: 2017,
///         day: 17,
///         solver: &Spinlock,
///         tags: &["2017", "simulation"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    pub year: u16,
    /// `1..=25`
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels the runner can filter on, e.g. `"2017"` or `"grid"`
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);
