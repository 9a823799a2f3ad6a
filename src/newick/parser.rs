//! Stack-based parser from Newick text to [Tree]s, eager
//! ([NewickParser]) or lazy ([NewickIterator]).

use crate::model::{BranchLength, EdgeIndex, NodeIndex, Tree, reconcile};
use crate::newick::defs::{DEFAULT_NUM_TIPS_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for single/multiple Newick trees of arbitrary degree.
///
/// Every returned [Tree] is already reconciled: its tip index and
/// bipartitions are computed before it is handed out.
///
/// # Configuration
/// * [`with_num_tips(num_tips)`](Self::with_num_tips)
///     - Can be configured with number of tips in trees to parse,
///       otherwise it is inferred from the first parsed tree and then
///       used to pre-allocate the following ones.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
/// * [`into_iter`](Self::into_iter) - Parse trees lazily
///
/// # Example
/// ```
/// use tipmap::newick::NewickParser;
/// use tipmap::parser::ByteParser;
///
/// let input = "(Kea:1.0,Kaka:1.0,(Kakapo:2.0,Kakariki:0.5)Parrots:0.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_tips(), 4);
/// assert!(tree.is_reconciled());
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    know_num_tips: bool,
    num_tips: usize,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser]; number of tips is inferred.
    pub fn new() -> Self {
        Self {
            know_num_tips: false,
            num_tips: DEFAULT_NUM_TIPS_GUESS,
        }
    }

    /// Sets the expected number of tips in each parsed tree.
    ///
    /// This allows pre-allocation of data structures for better performance.
    pub fn with_num_tips(mut self, num_tips: usize) -> Self {
        self.num_tips = num_tips;
        self.know_num_tips = true;
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Consumes the parser and returns an iterator over trees from the byte source.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser with underlying source containing only
    ///   Newick strings, except for whitespace and `[...]` comments.
    pub fn into_iter<B: ByteSource>(self, byte_parser: ByteParser<B>) -> NewickIterator<B> {
        NewickIterator {
            byte_parser,
            parser: self,
            done: false,
        }
    }

    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees (possibly none)
    /// * `Err(ParsingError)` - If any tree fails to parse, or reading the
    ///   source fails ([IoError](crate::parser::ParsingErrorType::IoError))
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        while let Some(tree) = self.next_tree(&mut byte_parser)? {
            trees.push(tree);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed and reconciled tree
    /// * `Err(ParsingError)` - If the Newick format is invalid or reading
    ///   the source fails
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Tree, ParsingError> {
        let result = self.parse_tree(parser);
        surface_read_error(parser, result)
    }
}

/// A source that failed to read looks like a truncated input; report the
/// read error instead of whatever the truncation caused.
fn surface_read_error<B: ByteSource, T>(
    parser: &mut ByteParser<B>,
    result: Result<T, ParsingError>,
) -> Result<T, ParsingError> {
    match parser.take_read_error() {
        Some(err) => Err(err),
        None => result,
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Skips to the next tree and parses it; `None` once only whitespace
    /// and comments are left.
    fn next_tree<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<Tree>, ParsingError> {
        let result = parser.skip_comment_and_whitespace().and_then(|()| {
            if parser.is_eof() {
                Ok(None)
            } else {
                self.parse_tree(parser).map(Some)
            }
        });
        surface_read_error(parser, result)
    }

    fn parse_tree<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Tree, ParsingError> {
        let mut tree = Tree::with_capacity(2 * self.num_tips);

        let root = self.parse_nodes(parser, &mut tree)?;
        if tree.num_nodes() == 1 && !tree[root].has_name() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Expected '(' or a label at start of tree".to_string(),
            ));
        }
        tree.set_root(root);

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        // Having parsed a full tree, the number of tips is now known
        if !self.know_num_tips {
            self.num_tips = tree.num_tips();
            self.know_num_tips = true;
        }

        reconcile(&mut tree)
            .map_err(|e| ParsingError::invalid_tree_structure(parser, e.to_string()))?;

        Ok(tree)
    }

    /// Parses the nodes of one tree up to (excluding) the `;` and returns
    /// the root:
    /// - `(child, child, ...)[label][:branch_length]` or `label[:branch_length]`
    /// - Node is added before its children, so arena order equals pre-order
    /// - Branch length goes onto the edge to the parent, or the root length
    ///   if there is no parent
    ///
    /// Nodes whose `(` has been read wait on an explicit stack for their `)`.
    fn parse_nodes<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
    ) -> Result<NodeIndex, ParsingError> {
        let mut open: Vec<(NodeIndex, Option<EdgeIndex>)> = Vec::new();
        let mut parent = None;

        loop {
            // Descend along first children down to a node without `(`
            let (node, edge) = loop {
                parser.skip_comment_and_whitespace()?;
                let node = tree.add_node("");
                let edge = parent.map(|p| tree.connect(p, node, None));
                if !parser.consume_if(b'(') {
                    break (node, edge);
                }
                open.push((node, edge));
                parent = Some(node);
            };
            self.parse_label_and_length(parser, tree, node, edge)?;

            // Close finished nodes until a sibling follows
            let mut finished = node;
            loop {
                let Some(&(top, top_edge)) = open.last() else {
                    return Ok(finished);
                };

                parser.skip_comment_and_whitespace()?;
                if parser.consume_if(b',') {
                    parent = Some(top);
                    break;
                }
                if !parser.consume_if(b')') {
                    let next_char = parser.peek().map(char::from);
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after child but found {:?}", next_char),
                    ));
                }

                open.pop();
                self.parse_label_and_length(parser, tree, top, top_edge)?;
                finished = top;
            }
        }
    }

    /// Parses the optional label and branch length following a node.
    fn parse_label_and_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
        node: NodeIndex,
        edge: Option<EdgeIndex>,
    ) -> Result<(), ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if !label.is_empty() {
            tree.set_node_name(node, label);
        }

        let branch_length = self.parse_branch_length(parser)?;
        match edge {
            Some(edge) => tree.set_edge_length(edge, branch_length),
            None => tree.set_root_length(branch_length),
        }
        Ok(())
    }

    /// Parses an optional `:number` suffix. Whitespace and comments may
    /// surround the colon; the number itself runs up to the next delimiter
    /// and may use scientific notation (`1.5e-10`).
    ///
    /// # Errors
    /// If the number is malformed, negative, or not finite.
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let token = parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS)?;
        let Ok(value) = token.parse::<f64>() else {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Invalid branch length: {:?}", token),
            ));
        };

        BranchLength::try_new(value).map(Some).ok_or_else(|| {
            ParsingError::invalid_newick_string(
                parser,
                format!("Branch length must be non-negative and finite: {}", value),
            )
        })
    }
}

// =#========================================================================#=
// NEWICK ITERATOR (lazy parser)
// =#========================================================================$=
/// Iterator to parse Newick trees.
///
/// Created by [NewickParser::into_iter()].
/// Yields `Result<Tree, ParsingError>` for each tree and stops after the
/// first error.
pub struct NewickIterator<B: ByteSource> {
    parser: NewickParser,
    byte_parser: ByteParser<B>,
    done: bool,
}

impl<B: ByteSource> NewickIterator<B> {
    /// Consumes the iterator and returns the underlying [NewickParser].
    pub fn into_parser(self) -> NewickParser {
        self.parser
    }
}

impl<B: ByteSource> Iterator for NewickIterator<B> {
    type Item = Result<Tree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.parser.next_tree(&mut self.byte_parser) {
            Ok(Some(tree)) => Some(Ok(tree)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
