//! Grammar types.

use crate::{types::Map, util::display_fn};
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TerminalID {
    raw: u16,
}

impl TerminalID {
    /// Reserved symbol used as a terminal symbol that means the end of input.
    pub const EOI: Self = Self::from_raw(0);

    const OFFSET: u16 = 1;

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    #[inline]
    pub const fn into_raw(self) -> u16 {
        self.raw
    }

    /// The column of this terminal in the action table.
    #[inline]
    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

impl fmt::Debug for TerminalID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EOI => write!(f, "T#End"),
            _ => write!(f, "T#{:03}", self.raw),
        }
    }
}

#[derive(Debug)]
pub struct Terminal {
    id: TerminalID,
    name: String,
    spelling: Option<String>,
    precedence: Option<Precedence>,
}

impl Terminal {
    pub fn id(&self) -> TerminalID {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The literal token text used by code generation, if declared.
    pub fn spelling(&self) -> Option<&str> {
        self.spelling.as_deref()
    }

    pub fn precedence(&self) -> Option<Precedence> {
        self.precedence
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NonterminalID {
    raw: u16,
}

impl NonterminalID {
    /// Reserved symbol used as the left-hand side of the goal rule.
    pub const ACCEPT: Self = Self::from_raw(0);

    const OFFSET: u16 = 1;

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    #[inline]
    pub const fn into_raw(self) -> u16 {
        self.raw
    }

    /// The column of this nonterminal in the goto table.
    #[inline]
    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

impl fmt::Debug for NonterminalID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ACCEPT => write!(f, "N#Accept"),
            _ => write!(f, "N#{:03}", self.raw),
        }
    }
}

#[derive(Debug)]
pub struct Nonterminal {
    id: NonterminalID,
    name: String,
}

impl Nonterminal {
    pub fn id(&self) -> NonterminalID {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum SymbolID {
    T(TerminalID),
    N(NonterminalID),
}

impl fmt::Debug for SymbolID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::T(t) => write!(f, "{:?}", t),
            Self::N(n) => write!(f, "{:?}", n),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RuleID {
    raw: u16,
}

impl RuleID {
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    #[inline]
    pub const fn into_raw(self) -> u16 {
        self.raw
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

impl fmt::Debug for RuleID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R#{:03}", self.raw)
    }
}

/// The type that represents a production rule in grammar.
#[derive(Debug)]
pub struct Rule {
    id: RuleID,
    left: NonterminalID,
    right: Vec<SymbolID>,
    prec: Option<TerminalID>,
}

impl Rule {
    pub fn id(&self) -> RuleID {
        self.id
    }

    /// Return the left-hand side of this production.
    pub fn left(&self) -> NonterminalID {
        self.left
    }

    /// Return the right-hand side of this production.
    pub fn right(&self) -> &[SymbolID] {
        &self.right[..]
    }

    /// The terminal that determines the precedence of this rule.
    ///
    /// This is the symbol given by `%prec` if any, otherwise the rightmost
    /// terminal of the right-hand side.
    pub fn precedence_symbol(&self) -> Option<TerminalID> {
        self.prec.or_else(|| {
            self.right.iter().rev().find_map(|symbol| match symbol {
                SymbolID::T(t) => Some(*t),
                SymbolID::N(..) => None,
            })
        })
    }

    pub fn precedence(&self, g: &Grammar) -> Option<Precedence> {
        self.precedence_symbol()
            .and_then(|t| g.terminals[&t].precedence())
    }

    // `"LHS ::= R1 R2 R3"`
    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            write!(f, "{} ::=", g.nonterminals[&self.left])?;
            for symbol in &self.right {
                write!(f, " {}", g.symbol_name(*symbol))?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Precedence {
    pub priority: u16,
    pub assoc: Assoc,
}

impl Precedence {
    pub const fn new(priority: u16, assoc: Assoc) -> Self {
        Self { priority, assoc }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    Nonassoc,
}

impl fmt::Display for Assoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Nonassoc => write!(f, "nonassoc"),
        }
    }
}

/// The grammar definition used to derive the parser tables.
///
/// The grammar is augmented with the goal rule `$accept ::= start $end`,
/// which is always the last rule.
#[derive(Debug)]
#[non_exhaustive]
pub struct Grammar {
    pub terminals: Map<TerminalID, Terminal>,
    pub nonterminals: Map<NonterminalID, Nonterminal>,
    pub rules: Map<RuleID, Rule>,
    /// The rules grouped by their left-hand side, in declaration order.
    pub rule_map: Map<NonterminalID, Vec<RuleID>>,
    pub start_symbol: NonterminalID,
    /// The number of shift/reduce conflicts declared by `%expect`.
    pub expected_shift_reduce: usize,
    /// The number of reduce/reduce conflicts declared by `%expect-rr`.
    pub expected_reduce_reduce: usize,
    names: Map<String, SymbolID>,
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## terminals:")?;
        for terminal in self.terminals.values() {
            write!(f, "{}", terminal)?;
            if let Some(spelling) = terminal.spelling() {
                write!(f, " {:?}", spelling)?;
            }
            if let Some(prec) = terminal.precedence() {
                write!(f, " (priority={}, assoc={})", prec.priority, prec.assoc)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\n## nonterminals:")?;
        for nonterminal in self.nonterminals.values() {
            write!(f, "{}", nonterminal)?;
            if nonterminal.id() == self.start_symbol {
                write!(f, " (start)")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\n## rules:")?;
        for rule in self.rules.values() {
            write!(f, "{:>3}) {}", rule.id().into_raw(), rule.display(self))?;
            if let Some(prec) = rule.prec {
                write!(f, " %prec {}", self.terminals[&prec])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Grammar {
    /// Define a grammar using the specified function.
    pub fn define<F>(f: F) -> Result<Self, GrammarError>
    where
        F: FnOnce(&mut GrammarDef) -> Result<(), GrammarError>,
    {
        let mut def = GrammarDef::default();
        f(&mut def)?;
        def.end()
    }

    pub fn rule(&self, id: RuleID) -> &Rule {
        &self.rules[&id]
    }

    /// The synthesized rule `$accept ::= start $end`.
    pub fn goal_rule(&self) -> RuleID {
        RuleID::from_raw((self.rules.len() - 1) as u16)
    }

    /// The rules whose left-hand side is `n`.
    pub fn rules_of(&self, n: NonterminalID) -> &[RuleID] {
        self.rule_map.get(&n).map_or(&[], |rules| &rules[..])
    }

    /// Look up an interned symbol by its name.
    pub fn lookup(&self, name: &str) -> Option<SymbolID> {
        self.names.get(name).copied()
    }

    pub fn symbol_name(&self, symbol: SymbolID) -> &str {
        match symbol {
            SymbolID::T(t) => self.terminals[&t].name(),
            SymbolID::N(n) => self.nonterminals[&n].name(),
        }
    }
}

/// The contextural values for building a `Grammar`.
#[derive(Debug)]
pub struct GrammarDef {
    terminals: Map<TerminalID, Terminal>,
    nonterminals: Map<NonterminalID, Nonterminal>,
    rules: Map<RuleID, Rule>,
    names: Map<String, SymbolID>,
    start: Option<NonterminalID>,
    next_terminal_id: u16,
    next_nonterminal_id: u16,
    next_rule_id: u16,
    next_priority: u16,
    expected_shift_reduce: usize,
    expected_reduce_reduce: usize,
}

impl Default for GrammarDef {
    fn default() -> Self {
        let mut def = Self {
            terminals: Map::default(),
            nonterminals: Map::default(),
            rules: Map::default(),
            names: Map::default(),
            start: None,
            next_terminal_id: TerminalID::OFFSET,
            next_nonterminal_id: NonterminalID::OFFSET,
            next_rule_id: 0,
            next_priority: 0,
            expected_shift_reduce: 0,
            expected_reduce_reduce: 0,
        };

        def.terminals.insert(
            TerminalID::EOI,
            Terminal {
                id: TerminalID::EOI,
                name: "$end".into(),
                spelling: None,
                precedence: None,
            },
        );
        def.names.insert("$end".into(), SymbolID::T(TerminalID::EOI));

        def.nonterminals.insert(
            NonterminalID::ACCEPT,
            Nonterminal {
                id: NonterminalID::ACCEPT,
                name: "$accept".into(),
            },
        );
        def.names
            .insert("$accept".into(), SymbolID::N(NonterminalID::ACCEPT));

        def
    }
}

impl GrammarDef {
    /// Declare a terminal symbol used in this grammar.
    ///
    /// Declaring the same name twice returns the same symbol.
    pub fn token(&mut self, name: &str) -> Result<TerminalID, GrammarError> {
        match self.names.get(name) {
            Some(SymbolID::T(t)) => return Ok(*t),
            Some(SymbolID::N(..)) => {
                return Err(GrammarError::SymbolKindMismatch { name: name.into() })
            }
            None => (),
        }

        let id = TerminalID::from_raw(self.next_terminal_id);
        self.next_terminal_id = self
            .next_terminal_id
            .checked_add(1)
            .ok_or("too many terminal symbols")?;

        self.terminals.insert(
            id,
            Terminal {
                id,
                name: name.into(),
                spelling: None,
                precedence: None,
            },
        );
        self.names.insert(name.into(), SymbolID::T(id));

        Ok(id)
    }

    /// Declare a terminal symbol together with its literal spelling.
    pub fn token_spelled(&mut self, name: &str, spelling: &str) -> Result<TerminalID, GrammarError> {
        let id = self.token(name)?;
        self.terminals[&id].spelling = Some(spelling.into());
        Ok(id)
    }

    /// Declare a nonterminal symbol used in this grammar.
    ///
    /// Declaring the same name twice returns the same symbol.
    pub fn nonterminal(&mut self, name: &str) -> Result<NonterminalID, GrammarError> {
        match self.names.get(name) {
            Some(SymbolID::N(n)) => return Ok(*n),
            Some(SymbolID::T(..)) => {
                return Err(GrammarError::SymbolKindMismatch { name: name.into() })
            }
            None => (),
        }

        let id = NonterminalID::from_raw(self.next_nonterminal_id);
        self.next_nonterminal_id = self
            .next_nonterminal_id
            .checked_add(1)
            .ok_or("too many nonterminal symbols")?;

        self.nonterminals.insert(
            id,
            Nonterminal {
                id,
                name: name.into(),
            },
        );
        self.names.insert(name.into(), SymbolID::N(id));

        Ok(id)
    }

    /// Resolve a symbol name appearing on the right-hand side of a rule.
    ///
    /// Names that are not declared as terminals are treated as nonterminals.
    pub fn symbol(&mut self, name: &str) -> Result<SymbolID, GrammarError> {
        match self.names.get(name) {
            Some(symbol) => Ok(*symbol),
            None => self.nonterminal(name).map(SymbolID::N),
        }
    }

    /// `%left`: declare a new precedence level binding tighter than the previous ones.
    pub fn left<'a, I>(&mut self, names: I) -> Result<(), GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.precedence(Assoc::Left, names)
    }

    /// `%right`
    pub fn right<'a, I>(&mut self, names: I) -> Result<(), GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.precedence(Assoc::Right, names)
    }

    /// `%nonassoc`
    pub fn nonassoc<'a, I>(&mut self, names: I) -> Result<(), GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.precedence(Assoc::Nonassoc, names)
    }

    fn precedence<'a, I>(&mut self, assoc: Assoc, names: I) -> Result<(), GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.next_priority = self
            .next_priority
            .checked_add(1)
            .ok_or("too many precedence levels")?;
        let prec = Precedence::new(self.next_priority, assoc);
        for name in names {
            let id = self.token(name)?;
            self.terminals[&id].precedence = Some(prec);
        }
        Ok(())
    }

    /// Specify a production rule into this grammar.
    pub fn rule<'a, I>(&mut self, left: &str, right: I) -> Result<RuleID, GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.add_rule(left, right, None)
    }

    /// Specify a production rule whose precedence is taken from `prec` (`%prec`).
    pub fn rule_prec<'a, I>(
        &mut self,
        left: &str,
        right: I,
        prec: &str,
    ) -> Result<RuleID, GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.add_rule(left, right, Some(prec))
    }

    fn add_rule<'a, I>(
        &mut self,
        left: &str,
        right: I,
        prec: Option<&str>,
    ) -> Result<RuleID, GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self.names.get(left) {
            Some(SymbolID::T(..)) => {
                return Err(GrammarError::TerminalAsRuleLhs { name: left.into() })
            }
            Some(SymbolID::N(NonterminalID::ACCEPT)) => {
                return Err(GrammarError::ReservedRuleLhs { name: left.into() })
            }
            _ => (),
        }
        let left = self.nonterminal(left)?;

        let right = right
            .into_iter()
            .map(|name| self.symbol(name))
            .collect::<Result<Vec<_>, _>>()?;

        let prec = match prec {
            Some(name) => match self.names.get(name) {
                Some(SymbolID::T(t)) => Some(*t),
                _ => return Err(GrammarError::UnknownPrecedenceSymbol { name: name.into() }),
            },
            None => None,
        };

        if let Some(rule) = self
            .rules
            .values()
            .find(|rule| rule.left == left && rule.right == right)
        {
            return Err(GrammarError::DuplicateRule {
                rule: rule.id.into_raw(),
            });
        }

        let id = RuleID::from_raw(self.next_rule_id);
        self.next_rule_id = self
            .next_rule_id
            .checked_add(1)
            .ok_or("too many production rules")?;
        self.rules.insert(
            id,
            Rule {
                id,
                left,
                right,
                prec,
            },
        );

        Ok(id)
    }

    /// Specify the start symbol for this grammar (`%start`).
    pub fn start_symbol(&mut self, name: &str) -> Result<(), GrammarError> {
        let symbol = self.nonterminal(name)?;
        self.start.replace(symbol);
        Ok(())
    }

    /// The number of expected shift/reduce conflicts (`%expect`).
    pub fn expect(&mut self, n: usize) {
        self.expected_shift_reduce = n;
    }

    /// The number of expected reduce/reduce conflicts (`%expect-rr`).
    pub fn expect_rr(&mut self, n: usize) {
        self.expected_reduce_reduce = n;
    }

    fn end(mut self) -> Result<Grammar, GrammarError> {
        if self.rules.is_empty() {
            return Err(GrammarError::NoRules);
        }
        let start = self.start.ok_or(GrammarError::NoStartSymbol)?;

        let goal = RuleID::from_raw(self.next_rule_id);
        self.rules.insert(
            goal,
            Rule {
                id: goal,
                left: NonterminalID::ACCEPT,
                right: vec![SymbolID::N(start), SymbolID::T(TerminalID::EOI)],
                prec: None,
            },
        );

        let mut rule_map = Map::<NonterminalID, Vec<RuleID>>::default();
        for &n in self.nonterminals.keys() {
            rule_map.insert(n, vec![]);
        }
        for rule in self.rules.values() {
            rule_map.entry(rule.left).or_default().push(rule.id);
        }

        Ok(Grammar {
            terminals: self.terminals,
            nonterminals: self.nonterminals,
            rules: self.rules,
            rule_map,
            start_symbol: start,
            expected_shift_reduce: self.expected_shift_reduce,
            expected_reduce_reduce: self.expected_reduce_reduce,
            names: self.names,
        })
    }
}

/// Fatal errors detected while defining a grammar.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("no rules declared")]
    NoRules,

    #[error("no start symbol declared")]
    NoStartSymbol,

    #[error("the terminal `{}' is used as the left-hand side of a rule", name)]
    TerminalAsRuleLhs { name: String },

    #[error("`{}' is reserved for the goal rule", name)]
    ReservedRuleLhs { name: String },

    #[error("the symbol `{}' is declared both as a terminal and as a nonterminal", name)]
    SymbolKindMismatch { name: String },

    #[error("`{}' is not a terminal symbol and cannot be used with %prec", name)]
    UnknownPrecedenceSymbol { name: String },

    #[error("duplicate production rule (first declared as rule {})", rule)]
    DuplicateRule { rule: u16 },

    #[error("{}", msg)]
    Other { msg: String },
}

impl From<&str> for GrammarError {
    fn from(msg: &str) -> Self {
        Self::Other { msg: msg.into() }
    }
}

impl From<String> for GrammarError {
    fn from(msg: String) -> Self {
        Self::Other { msg }
    }
}

/// Sample grammars.
pub mod examples {
    use super::*;

    /// The textbook expression grammar.
    pub fn arithmetic(g: &mut GrammarDef) -> Result<(), GrammarError> {
        for t in ["+", "*", "(", ")", "id"] {
            g.token(t)?;
        }
        g.start_symbol("E")?;

        g.rule("E", ["E", "+", "T"])?;
        g.rule("E", ["T"])?;
        g.rule("T", ["T", "*", "F"])?;
        g.rule("T", ["F"])?;
        g.rule("F", ["(", "E", ")"])?;
        g.rule("F", ["id"])?;
        Ok(())
    }

    /// An ambiguous expression grammar without any precedence.
    ///
    /// The LALR(1) automaton has four shift/reduce conflicts.
    pub fn ambiguous(g: &mut GrammarDef) -> Result<(), GrammarError> {
        for t in ["+", "*", "id"] {
            g.token(t)?;
        }
        g.start_symbol("E")?;
        g.expect(4);

        g.rule("E", ["E", "+", "E"])?;
        g.rule("E", ["E", "*", "E"])?;
        g.rule("E", ["id"])?;
        Ok(())
    }

    /// The same ambiguous grammar, disambiguated by precedence.
    pub fn ambiguous_prec(g: &mut GrammarDef) -> Result<(), GrammarError> {
        g.left(["+"])?;
        g.left(["*"])?;
        g.token("id")?;
        g.start_symbol("E")?;

        g.rule("E", ["E", "+", "E"])?;
        g.rule("E", ["E", "*", "E"])?;
        g.rule("E", ["id"])?;
        Ok(())
    }

    /// Arithmetic with a right-associative power and a unary minus using `%prec`.
    pub fn arithmetic_prec(g: &mut GrammarDef) -> Result<(), GrammarError> {
        g.left(["+", "-"])?;
        g.left(["*", "/"])?;
        g.right(["^"])?;
        g.nonassoc(["UMINUS"])?;
        for t in ["(", ")", "num"] {
            g.token(t)?;
        }
        g.start_symbol("expr")?;

        for op in ["+", "-", "*", "/", "^"] {
            g.rule("expr", ["expr", op, "expr"])?;
        }
        g.rule_prec("expr", ["-", "expr"], "UMINUS")?;
        g.rule("expr", ["(", "expr", ")"])?;
        g.rule("expr", ["num"])?;
        Ok(())
    }

    /// A non-associative comparison operator.
    pub fn comparison(g: &mut GrammarDef) -> Result<(), GrammarError> {
        g.nonassoc(["<"])?;
        g.left(["+"])?;
        g.token("id")?;
        g.start_symbol("E")?;

        g.rule("E", ["E", "<", "E"])?;
        g.rule("E", ["E", "+", "E"])?;
        g.rule("E", ["id"])?;
        Ok(())
    }

    /// The dangling `else`, resolved by the default shift.
    pub fn dangling_else(g: &mut GrammarDef) -> Result<(), GrammarError> {
        for t in ["if", "then", "else", "cond", "other"] {
            g.token(t)?;
        }
        g.start_symbol("stmt")?;
        g.expect(1);

        g.rule("stmt", ["if", "cond", "then", "stmt"])?;
        g.rule("stmt", ["if", "cond", "then", "stmt", "else", "stmt"])?;
        g.rule("stmt", ["other"])?;
        Ok(())
    }

    /// Two rules reducing the same token in the same context.
    pub fn reduce_reduce(g: &mut GrammarDef) -> Result<(), GrammarError> {
        g.token("a")?;
        g.token("x")?;
        g.start_symbol("S")?;

        g.rule("S", ["A", "x"])?;
        g.rule("S", ["B", "x"])?;
        g.rule("A", ["a"])?;
        g.rule("B", ["a"])?;
        Ok(())
    }

    /// `A -> B; B -> C; C -> ε`
    pub fn nullable_chain(g: &mut GrammarDef) -> Result<(), GrammarError> {
        g.start_symbol("A")?;

        g.rule("A", ["B"])?;
        g.rule("B", ["C"])?;
        g.rule("C", [])?;
        Ok(())
    }

    /// `A -> B; B -> 'x'`
    pub fn not_nullable(g: &mut GrammarDef) -> Result<(), GrammarError> {
        g.token("x")?;
        g.start_symbol("A")?;

        g.rule("A", ["B"])?;
        g.rule("B", ["x"])?;
        Ok(())
    }

    /// A grammar with nullable symbols in the middle of rules.
    ///
    /// It is ambiguous, so the tables come with shift/reduce conflicts.
    pub fn with_nullable(g: &mut GrammarDef) -> Result<(), GrammarError> {
        // E → E + T n | T
        // T → a | ( E n ) | n a
        // n → ϵ | num
        for t in ["(", ")", "+", "a", "num"] {
            g.token(t)?;
        }
        g.start_symbol("E")?;

        g.rule("E", ["E", "+", "T", "n"])?;
        g.rule("E", ["T"])?;
        g.rule("T", ["a"])?;
        g.rule("T", ["(", "E", "n", ")"])?;
        g.rule("T", ["n", "a"])?;
        g.rule("n", [])?;
        g.rule("n", ["num"])?;
        Ok(())
    }

    /// A grammar containing a rule that is not reachable from the start symbol.
    pub fn with_useless_rule(g: &mut GrammarDef) -> Result<(), GrammarError> {
        for t in ["a", "b", "c"] {
            g.token(t)?;
        }
        g.start_symbol("S")?;

        g.rule("S", ["a", "S"])?;
        g.rule("S", ["b"])?;
        g.rule("U", ["c"])?;
        Ok(())
    }
}
