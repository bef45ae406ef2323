//! In-memory page model: the element tree the viewer and the prober consume.

use crate::error::Result;
use crate::viewer::ImageRef;

/// Identifier of an image within a [`Page`], assigned in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One `<img>` element.
#[derive(Clone, Debug, PartialEq)]
pub struct PageImage {
    pub id: ImageId,
    pub src: String,
    pub alt: String,
    /// Text of the enclosing figure's caption, if any.
    pub caption: Option<String>,
    pub classes: Vec<String>,
    /// Classes of every enclosing element, outermost first.
    pub ancestor_classes: Vec<String>,
    /// Set once every path variation failed to load.
    pub broken: bool,
}

impl PageImage {
    /// A detached image. Its id and ancestor classes are assigned when it
    /// becomes part of a page.
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id: ImageId(0),
            src: src.into(),
            alt: alt.into(),
            caption: None,
            classes: Vec::new(),
            ancestor_classes: Vec::new(),
            broken: false,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    /// True if the image itself or any enclosing element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .iter()
            .chain(self.ancestor_classes.iter())
            .any(|c| c.eq_ignore_ascii_case(class))
    }

    /// Snapshot of what the viewer displays for this image.
    pub fn image_ref(&self) -> Result<ImageRef> {
        let caption = self.caption.clone().unwrap_or_else(|| self.alt.clone());
        ImageRef::new(self.src.clone(), self.alt.clone(), caption)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageNode {
    Element {
        tag: String,
        classes: Vec<String>,
        children: Vec<PageNode>,
    },
    Image(PageImage),
}

impl PageNode {
    pub fn element(tag: &str, classes: &[&str], children: Vec<PageNode>) -> Self {
        Self::Element {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            children,
        }
    }

    /// Every image in this subtree, in document order.
    pub fn images(&self) -> Vec<&PageImage> {
        let mut out = Vec::new();
        self.collect_images(&mut out);
        out
    }

    fn collect_images<'a>(&'a self, out: &mut Vec<&'a PageImage>) {
        match self {
            Self::Image(img) => out.push(img),
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_images(out);
                }
            }
        }
    }

    fn find_image_mut(&mut self, id: ImageId) -> Option<&mut PageImage> {
        match self {
            Self::Image(img) => (img.id == id).then_some(img),
            Self::Element { children, .. } => {
                children.iter_mut().find_map(|child| child.find_image_mut(id))
            }
        }
    }

    pub(crate) fn for_each_image_mut(&mut self, f: &mut impl FnMut(&mut PageImage)) {
        match self {
            Self::Image(img) => f(img),
            Self::Element { children, .. } => {
                for child in children {
                    child.for_each_image_mut(f);
                }
            }
        }
    }
}

/// Receives subtrees inserted into a page after it was first built.
pub trait SubtreeObserver {
    fn subtree_inserted(&mut self, node: &PageNode);
}

/// A document: its URL path plus the element tree rooted at `<body>`.
#[derive(Clone, Debug)]
pub struct Page {
    path: String,
    root: PageNode,
    next_id: u32,
}

impl Page {
    pub fn new(path: impl Into<String>) -> Self {
        Self::from_root(path, PageNode::element("body", &[], Vec::new()))
    }

    /// Adopt an existing tree, assigning image ids and ancestor classes.
    pub fn from_root(path: impl Into<String>, mut root: PageNode) -> Self {
        let mut next_id = 0;
        let root_classes = match &root {
            PageNode::Element { classes, .. } => classes.clone(),
            PageNode::Image(_) => Vec::new(),
        };
        if let PageNode::Element { children, .. } = &mut root {
            for child in children.iter_mut() {
                adopt(child, &root_classes, &mut next_id);
            }
        } else {
            adopt(&mut root, &[], &mut next_id);
        }
        Self {
            path: path.into(),
            root,
            next_id,
        }
    }

    /// Parse HTML markup into a page. See [`crate::html`].
    pub fn from_html(path: impl Into<String>, html: &str) -> Result<Self> {
        let root = crate::html::parse_body(html)?;
        Ok(Self::from_root(path, root))
    }

    /// URL path of the document, e.g. `/PAM4Receiver/index.html`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn root(&self) -> &PageNode {
        &self.root
    }

    pub fn images(&self) -> Vec<&PageImage> {
        self.root.images()
    }

    pub fn image(&self, id: ImageId) -> Option<&PageImage> {
        self.images().into_iter().find(|img| img.id == id)
    }

    pub fn image_mut(&mut self, id: ImageId) -> Option<&mut PageImage> {
        self.root.find_image_mut(id)
    }

    /// Append `node` to the end of the body and notify `observer`.
    ///
    /// Images inside the subtree receive fresh ids. Returns the ids assigned.
    pub fn insert(&mut self, mut node: PageNode, observer: &mut dyn SubtreeObserver) -> Vec<ImageId> {
        let body_classes = match &self.root {
            PageNode::Element { classes, .. } => classes.clone(),
            PageNode::Image(_) => Vec::new(),
        };
        adopt(&mut node, &body_classes, &mut self.next_id);
        let ids = node.images().iter().map(|img| img.id).collect();

        if let PageNode::Element { children, .. } = &mut self.root {
            children.push(node);
            if let Some(inserted) = children.last() {
                observer.subtree_inserted(inserted);
            }
        }
        ids
    }
}

/// Assign ids and ancestor classes throughout a subtree.
fn adopt(node: &mut PageNode, inherited: &[String], next_id: &mut u32) {
    match node {
        PageNode::Image(img) => {
            img.id = ImageId(*next_id);
            *next_id += 1;
            img.ancestor_classes = inherited.to_vec();
        }
        PageNode::Element {
            classes, children, ..
        } => {
            let mut scope = inherited.to_vec();
            scope.extend(classes.iter().cloned());
            for child in children.iter_mut() {
                adopt(child, &scope, next_id);
            }
        }
    }
}
